use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use courseload_core::AppError;
use courseload_models::{
    CourseDetailResponse, CourseResponse, CourseUpdatedResponse, CoursesResponse,
    CreateCourseRequest, MessageResponse, UpdateCourseRequest,
};
use tracing::instrument;

use super::service::CourseService;
use crate::middleware::auth::{AuthUser, RequireStaff};
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a course owned by the caller
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Missing or invalid course fields", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_course(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    ValidatedJson(dto): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AppError> {
    let course = CourseService::create_course(state.courses.as_ref(), &actor, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CourseResponse {
            message: "Course created successfully.".to_string(),
            course,
        }),
    ))
}

/// List every course with its lecturer
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = CoursesResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_courses(
    State(state): State<AppState>,
    _actor: AuthUser,
) -> Result<Json<CoursesResponse>, AppError> {
    let courses = CourseService::list_courses(state.courses.as_ref(), state.users.as_ref()).await?;
    Ok(Json(CoursesResponse { courses }))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _actor))]
pub async fn get_course(
    State(state): State<AppState>,
    _actor: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course =
        CourseService::get_course(state.courses.as_ref(), state.users.as_ref(), &id).await?;
    Ok(Json(CourseDetailResponse { course }))
}

/// Edit a course. Owners and QA only; paymentStatus is applied for QA only
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseUpdatedResponse),
        (status = 400, description = "Invalid course fields", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Not the owner", body = MessageResponse),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, actor, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireStaff(actor): RequireStaff,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<CourseUpdatedResponse>, AppError> {
    let course = CourseService::update_course(
        state.courses.as_ref(),
        state.users.as_ref(),
        &actor,
        &id,
        dto,
    )
    .await?;
    Ok(Json(CourseUpdatedResponse {
        message: "Course updated successfully.".to_string(),
        course,
    }))
}

/// Toggle a course's payment approval (QA only)
#[utoipa::path(
    patch,
    path = "/api/courses/{id}/approve",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Payment status toggled", body = CourseResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Caller is not QA", body = MessageResponse),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, actor))]
pub async fn approve_course(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, AppError> {
    let (course, status) =
        CourseService::approve_course(state.courses.as_ref(), &actor, &id).await?;
    Ok(Json(CourseResponse {
        message: format!("Course status updated to {status}."),
        course,
    }))
}
