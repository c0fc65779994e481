//! # Courseload Auth
//!
//! Identity tokens for the Courseload API.
//!
//! - [`claims`]: The JWT claim structure
//! - [`jwt`]: Token issuance and verification
//!
//! A token encodes only the user ID and an expiry. Verification fails for a
//! bad signature, a malformed token, or an expired token.

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, decode_token, verify_token};
