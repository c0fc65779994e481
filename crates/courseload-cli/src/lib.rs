//! # Courseload CLI
//!
//! Administrative helpers shared by the `courseload-cli` binary and the API
//! server's startup routine.
//!
//! ## Usage
//!
//! ```ignore
//! use courseload_cli::seeder::seed_qa_admin;
//!
//! if let Some(seed) = &app_config.seed_admin {
//!     seed_qa_admin(users.as_ref(), seed, &app_config).await?;
//! }
//! ```

pub mod seeder;
