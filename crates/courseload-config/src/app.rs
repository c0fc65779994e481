//! Process-level settings: deployment environment, listen port, the
//! institutional email domain, and the optional seed QA administrator.

use std::env;
use std::fmt;

/// Email domain accepted for registration and QA creation when none is configured.
pub const DEFAULT_INSTITUTIONAL_DOMAIN: &str = "utg.edu.gm";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "test" => Self::Test,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials and payment details for the QA administrator created at startup.
#[derive(Clone)]
pub struct SeedAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bank_name: String,
    pub bank_account_number: String,
    pub bank_bban: String,
    pub school: String,
}

impl SeedAdminConfig {
    /// Returns `None` unless both `QAADMIN_EMAIL` and `QAADMIN_PASSWORD` are set.
    pub fn from_env() -> Option<Self> {
        let email = non_empty_var("QAADMIN_EMAIL")?;
        let password = non_empty_var("QAADMIN_PASSWORD")?;

        Some(Self {
            name: non_empty_var("QAADMIN_NAME").unwrap_or_else(|| "QA Admin".to_string()),
            email,
            password,
            bank_name: non_empty_var("QAADMIN_BANK_NAME")
                .unwrap_or_else(|| "Default Bank".to_string()),
            bank_account_number: non_empty_var("QAADMIN_BANK_ACCOUNT")
                .unwrap_or_else(|| "00000000".to_string()),
            bank_bban: non_empty_var("QAADMIN_BANK_BBAN")
                .unwrap_or_else(|| "0000000000".to_string()),
            school: non_empty_var("QAADMIN_SCHOOL").unwrap_or_else(|| "N/A".to_string()),
        })
    }
}

impl fmt::Debug for SeedAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedAdminConfig")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("school", &self.school)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub institutional_domain: String,
    pub database_url: Option<String>,
    pub seed_admin: Option<SeedAdminConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            port: 12000,
            institutional_domain: DEFAULT_INSTITUTIONAL_DOMAIN.to_string(),
            database_url: None,
            seed_admin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12000),
            institutional_domain: non_empty_var("INSTITUTIONAL_EMAIL_DOMAIN")
                .map(|d| d.trim_start_matches('@').to_lowercase())
                .unwrap_or_else(|| DEFAULT_INSTITUTIONAL_DOMAIN.to_string()),
            database_url: non_empty_var("DATABASE_URL"),
            seed_admin: SeedAdminConfig::from_env(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
