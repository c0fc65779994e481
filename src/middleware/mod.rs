//! Authentication and authorization for request handlers.
//!
//! - [`auth`]: the [`auth::AuthUser`] extractor and the `require_role!` guards
//! - [`role`]: router-level role middleware
//! - [`error_stack`]: development-only error chain in 5xx bodies
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthUser` verifies the token and reloads the user from the store
//! 3. A role guard (`RequireQa`, `RequireStaff` or `require_qa`) checks the role
//! 4. The handler runs with the resolved caller
//!
//! ```ignore
//! async fn approve(RequireQa(actor): RequireQa, Path(id): Path<String>) -> ... {
//!     // only QA users get here
//! }
//! ```

pub mod auth;
pub mod error_stack;
pub mod role;
