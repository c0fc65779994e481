use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use courseload_core::AppError;
use courseload_models::{
    AssignRoleRequest, AssignRoleResponse, AuthResponse, CreateQaRequest, MessageResponse,
    NotificationRequest, NotificationResponse, UsersResponse,
};
use tracing::instrument;

use super::service::AdminService;
use crate::modules::notifications::service::NotificationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a QA user
#[utoipa::path(
    post,
    path = "/api/admin/create-qa",
    request_body = CreateQaRequest,
    responses(
        (status = 201, description = "QA user created", body = AuthResponse),
        (status = 400, description = "Missing fields, invalid email or user exists", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_qa_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateQaRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = AdminService::create_qa_user(
        state.users.as_ref(),
        dto,
        &state.jwt_config,
        &state.app_config.institutional_domain,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Assign a role to a user
#[utoipa::path(
    post,
    path = "/api/admin/assign-role",
    request_body = AssignRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = AssignRoleResponse),
        (status = 400, description = "Missing fields or invalid role", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn assign_role(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AssignRoleRequest>,
) -> Result<Json<AssignRoleResponse>, AppError> {
    let user = AdminService::assign_role(state.users.as_ref(), state.mailer.as_ref(), dto).await?;
    Ok(Json(AssignRoleResponse {
        message: format!("User role updated to '{}'.", user.role),
        user,
    }))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "All users", body = UsersResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<UsersResponse>, AppError> {
    let users = AdminService::list_users(state.users.as_ref()).await?;
    Ok(Json(UsersResponse { users }))
}

/// Email a message to every lecturer
#[utoipa::path(
    post,
    path = "/api/admin/send-notification",
    request_body = NotificationRequest,
    responses(
        (status = 200, description = "Notifications dispatched", body = NotificationResponse),
        (status = 400, description = "Empty message", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn send_notification(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<NotificationRequest>,
) -> Result<Json<NotificationResponse>, AppError> {
    let response = NotificationService::send_to_all_lecturers(
        state.users.as_ref(),
        state.mailer.clone(),
        dto,
    )
    .await?;
    Ok(Json(response))
}
