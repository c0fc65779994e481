//! # Courseload Core
//!
//! Core types, errors, and utilities for the Courseload API.
//!
//! - [`errors`]: Application and storage error types with HTTP response conversion
//! - [`password`]: Salted password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use courseload_core::{AppError, hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found."));
//!
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorStack, StoreError, StoreResult};
pub use password::{hash_password, verify_password};
