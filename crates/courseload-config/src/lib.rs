//! # Courseload Config
//!
//! Configuration types for the Courseload API, loaded from environment variables:
//!
//! - [`app`]: Environment, listen port, institutional email domain, seed administrator
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: CORS origin allow-list
//! - [`email`]: SMTP settings for outbound mail
//!
//! # Example
//!
//! ```ignore
//! use courseload_config::{AppConfig, CorsConfig, EmailConfig, JwtConfig};
//!
//! courseload_config::load_dotenv();
//!
//! let app_config = AppConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! ```

pub mod app;
pub mod cors;
pub mod email;
pub mod jwt;

// Re-export commonly used types at crate root
pub use app::{AppConfig, Environment, SeedAdminConfig};
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;

/// Loads a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}
