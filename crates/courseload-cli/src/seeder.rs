//! QA administrator provisioning.

use anyhow::{Context, Result};
use courseload_config::{AppConfig, Environment, SeedAdminConfig};
use courseload_core::hash_password;
use courseload_db::UserRepository;
use courseload_models::{InstitutionalEmail, NewUser, Role, User, normalize_email};
use tracing::{info, instrument};

#[derive(Debug)]
pub enum SeedOutcome {
    Created(User),
    AlreadyExists,
}

/// Creates the configured QA administrator unless an account with that
/// email already exists.
#[instrument(skip_all, fields(email = %seed.email))]
pub async fn seed_qa_admin(
    users: &dyn UserRepository,
    seed: &SeedAdminConfig,
    config: &AppConfig,
) -> Result<SeedOutcome> {
    info!("Seeding QA admin");
    log_seed_password(config.environment, &seed.password);

    if users
        .find_by_email(&normalize_email(&seed.email))
        .await
        .context("failed to look up seed admin")?
        .is_some()
    {
        info!("QA admin already exists");
        return Ok(SeedOutcome::AlreadyExists);
    }

    let email = InstitutionalEmail::parse(&seed.email, &config.institutional_domain)
        .context("invalid QAADMIN_EMAIL")?;
    let password_hash = hash_password(seed.password.trim()).map_err(|e| e.error)?;

    let user = users
        .create(NewUser {
            name: seed.name.trim().to_string(),
            email,
            password_hash,
            role: Role::Qa,
            bank_name: seed.bank_name.trim().to_string(),
            bank_account_number: seed.bank_account_number.trim().to_string(),
            bank_bban: seed.bank_bban.trim().to_string(),
            school: seed.school.trim().to_string(),
        })
        .await
        .context("failed to create seed admin")?;

    info!(user_id = %user.id, "QA admin seeded");
    Ok(SeedOutcome::Created(user))
}

/// Creates a QA account with placeholder bank details.
#[instrument(skip(users, password))]
pub async fn create_qa_user(
    users: &dyn UserRepository,
    name: &str,
    email: &str,
    password: &str,
    institutional_domain: &str,
) -> Result<User> {
    let email = InstitutionalEmail::parse(email, institutional_domain)?;
    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let user = users
        .create(NewUser::qa(name.trim(), email, password_hash))
        .await?;

    info!(user_id = %user.id, "QA user created");
    Ok(user)
}

/// Development diagnostic. Never runs in production deployments and is
/// compiled out of release builds.
#[cfg(debug_assertions)]
fn log_seed_password(environment: Environment, password: &str) {
    if !environment.is_production() {
        tracing::warn!(
            environment = %environment,
            "Seeding QA admin with plaintext password: {password} (development diagnostic)"
        );
    }
}

#[cfg(not(debug_assertions))]
fn log_seed_password(_environment: Environment, _password: &str) {}
