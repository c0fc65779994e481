use axum::{Router, routing::post};

use super::controller::send_notification;
use crate::state::AppState;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/", post(send_notification))
}
