//! Shared utilities.
//!
//! - [`email`]: outbound mail over SMTP, or a logging stand-in when SMTP is off

pub mod email;
