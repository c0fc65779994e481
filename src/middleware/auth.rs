use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use courseload_auth::verify_token;
use courseload_core::AppError;
use courseload_models::{Role, User, UserId};
use tracing::warn;

use crate::state::AppState;

/// The authenticated caller, resolved from the bearer token and reloaded from
/// the store on every request so role changes apply immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub school: String,
}

impl AuthUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    pub fn is_qa(&self) -> bool {
        self.has_role(Role::Qa)
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            school: user.school,
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Role middleware and the handler both extract; resolve once per request.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts).ok_or_else(|| {
            warn!("Authentication failed: no token provided");
            AppError::unauthorized("Access denied. No token provided.")
        })?;

        let user_id = verify_token(token, &state.jwt_config).inspect_err(|err| {
            warn!(error = %err.message(), "Authentication failed: token rejected");
        })?;

        let user = state
            .users
            .find_by_id(UserId::from_uuid(user_id))
            .await?
            .ok_or_else(|| {
                warn!(%user_id, "Authentication failed: user not found");
                AppError::unauthorized("Invalid token.")
            })?;

        let auth_user = AuthUser::from(user);
        parts.extensions.insert(auth_user.clone());
        Ok(auth_user)
    }
}

/// Builds an extractor that authenticates the caller and then requires one of
/// the listed roles, answering 403 otherwise.
#[macro_export]
macro_rules! require_role {
    ($name:ident, [$($role:expr),+ $(,)?], $message:literal) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = courseload_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !auth_user.has_any_role(&[$($role),+]) {
                    tracing::warn!(
                        user_id = %auth_user.id,
                        role = %auth_user.role,
                        "Authorization failed"
                    );
                    return Err(courseload_core::AppError::forbidden($message));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireQa, [Role::Qa], "Access denied. Only QA users are allowed.");
require_role!(RequireStaff, [Role::Lecturer, Role::Qa], "Access denied.");
