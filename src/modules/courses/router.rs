use axum::{
    Router,
    routing::{get, patch},
};

use super::controller::{approve_course, create_course, get_course, get_courses, update_course};
use crate::state::AppState;

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses).post(create_course))
        .route("/{id}", get(get_course).put(update_course))
        .route("/{id}/approve", patch(approve_course))
}
