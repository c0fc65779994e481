//! Role guards applied as route layers.
//!
//! Whole routers whose every route needs the same role use
//! [`require_qa`] through `middleware::from_fn_with_state`. Individual
//! handlers use the extractors generated by `require_role!` instead.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use courseload_core::AppError;
use courseload_models::Role;
use tracing::warn;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn require_roles(
    state: &AppState,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, state).await?;

    if !auth_user.has_any_role(allowed_roles) {
        warn!(
            user_id = %auth_user.id,
            role = %auth_user.role,
            "Authorization failed"
        );
        return Err(AppError::forbidden("Access denied. Only QA users are allowed."));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Admits only QA users.
///
/// ```rust,ignore
/// Router::new()
///     .route("/users", get(list_users))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_qa));
/// ```
pub async fn require_qa(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(&state, req, next, &[Role::Qa]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
