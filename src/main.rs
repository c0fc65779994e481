use courseload::logging::init_tracing;
use courseload::router::init_router;
use courseload::state::init_app_state;
use courseload_cli::seeder::{SeedOutcome, seed_qa_admin};
use courseload_config::{AppConfig, load_dotenv};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    load_dotenv();

    let config = AppConfig::from_env();
    if let Err(err) = init_tracing(&config) {
        eprintln!("Failed to initialise logging: {err:#}");
        std::process::exit(1);
    }

    // No in-process recovery: a panic anywhere takes the server down.
    std::panic::set_hook(Box::new(|panic| {
        error!(panic = %panic, "Unhandled panic, shutting down");
        std::process::exit(1);
    }));

    let state = match init_app_state(config.clone()).await {
        Ok(state) => state,
        Err(err) => {
            error!(error = ?err, "Failed to initialise application state");
            std::process::exit(1);
        }
    };

    if !config.environment.is_production() {
        if let Some(seed) = &config.seed_admin {
            match seed_qa_admin(state.users.as_ref(), seed, &config).await {
                Ok(SeedOutcome::Created(user)) => info!(user_id = %user.id, "Seeded QA admin"),
                Ok(SeedOutcome::AlreadyExists) => info!("QA admin already present"),
                Err(err) => error!(error = ?err, "Failed to seed QA admin"),
            }
        }
    }

    let app = init_router(state);
    let addr = format!("0.0.0.0:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    info!(environment = %config.environment.as_str(), "Server running on http://{addr}");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    if let Err(err) = axum::serve(listener, app).await {
        error!(error = %err, "Server error");
        std::process::exit(1);
    }
}
