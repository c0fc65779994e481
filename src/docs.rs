use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use courseload_models::{
    AssignRoleRequest, AssignRoleResponse, AuthResponse, Course, CourseDetailResponse,
    CourseResponse, CourseUpdatedResponse, CourseWithLecturer, CoursesResponse,
    CreateCourseRequest, CreateQaRequest, LecturerInfo, LoginRequest, MessageResponse,
    NotificationRequest, NotificationResponse, OverloadType, PaymentStatus, RegisterRequest, Role,
    Semester, UpdateCourseRequest, User, UserSummary, UsersResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::admin::controller::create_qa_user,
        crate::modules::admin::controller::assign_role,
        crate::modules::admin::controller::get_users,
        crate::modules::admin::controller::send_notification,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::approve_course,
        crate::modules::notifications::controller::send_notification,
    ),
    components(
        schemas(
            Role,
            User,
            UserSummary,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateQaRequest,
            AssignRoleRequest,
            AssignRoleResponse,
            UsersResponse,
            MessageResponse,
            Semester,
            OverloadType,
            PaymentStatus,
            Course,
            CourseWithLecturer,
            LecturerInfo,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseResponse,
            CourseDetailResponse,
            CourseUpdatedResponse,
            CoursesResponse,
            NotificationRequest,
            NotificationResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Lecturer registration and login"),
        (name = "Admin", description = "QA-only user administration"),
        (name = "Courses", description = "Course load records and payment approval"),
        (name = "Notifications", description = "Email broadcasts to lecturers")
    ),
    info(
        title = "Courseload API",
        version = "0.1.0",
        description = "Course load management for lecturers and QA officers, built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
