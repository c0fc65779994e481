use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::controller::{assign_role, create_qa_user, get_users, send_notification};
use crate::middleware::role::require_qa;
use crate::state::AppState;

/// Every admin route is QA-only.
pub fn init_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create-qa", post(create_qa_user))
        .route("/assign-role", post(assign_role))
        .route("/users", get(get_users))
        .route("/send-notification", post(send_notification))
        .route_layer(middleware::from_fn_with_state(state, require_qa))
}
