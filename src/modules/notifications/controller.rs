use axum::Json;
use axum::extract::State;
use courseload_core::AppError;
use courseload_models::{MessageResponse, NotificationRequest, NotificationResponse};
use tracing::instrument;

use super::service::NotificationService;
use crate::middleware::auth::RequireQa;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Email a message to every lecturer (QA only)
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = NotificationRequest,
    responses(
        (status = 200, description = "Notifications dispatched", body = NotificationResponse),
        (status = 400, description = "Empty message", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse)
    ),
    tag = "Notifications",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all, fields(actor = %actor.id))]
pub async fn send_notification(
    State(state): State<AppState>,
    RequireQa(actor): RequireQa,
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
