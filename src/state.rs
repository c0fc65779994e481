use std::sync::Arc;

use anyhow::{Context, bail};
use courseload_config::{AppConfig, CorsConfig, EmailConfig, JwtConfig};
use courseload_db::{CourseRepository, InMemoryStore, PgStore, UserRepository, init_db_pool};
use tracing::{info, warn};

use crate::utils::email::{Mailer, build_mailer};

/// Collaborators shared by every handler. Each is built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub app_config: AppConfig,
}

/// Connects storage and mail. A configured database that cannot be reached is
/// an error; production refuses to start without one.
pub async fn init_app_state(app_config: AppConfig) -> anyhow::Result<AppState> {
    let (users, courses): (Arc<dyn UserRepository>, Arc<dyn CourseRepository>) =
        match &app_config.database_url {
            Some(url) => {
                let pool = init_db_pool(url)
                    .await
                    .context("failed to connect to database")?;
                let store = Arc::new(PgStore::new(pool));
                store.migrate().await?;
                info!("Connected to PostgreSQL");
                (store.clone(), store)
            }
            None if app_config.environment.is_production() => {
                bail!("DATABASE_URL must be set in production")
            }
            None => {
                warn!("DATABASE_URL not set, using the in-memory store; data is lost on restart");
                let store = Arc::new(InMemoryStore::new());
                (store.clone(), store)
            }
        };

    let mailer = build_mailer(&EmailConfig::from_env()).map_err(|e| e.error)?;

    Ok(AppState {
        users,
        courses,
        mailer,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        app_config,
    })
}
