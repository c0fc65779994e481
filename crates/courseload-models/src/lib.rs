//! # Courseload Models
//!
//! Domain models and DTOs for the Courseload API: users and their roles,
//! courses with their load classification, and the request/response bodies
//! of every endpoint.
//!
//! # Modules
//!
//! - [`auth`]: registration, login and user administration bodies
//! - [`courses`]: course entity, enumerations and course bodies
//! - [`ids`]: typed identifiers
//! - [`notifications`]: broadcast bodies
//! - [`users`]: user entity and [`Role`]
//! - [`value_types`]: institutional email and enum text mapping

pub mod auth;
pub mod courses;
pub mod ids;
pub mod notifications;
pub mod users;
pub mod value_types;

pub use auth::{
    AssignRoleRequest, AssignRoleResponse, AuthResponse, CreateQaRequest, LoginRequest,
    MessageResponse, RegisterRequest, UsersResponse, required_text,
};
pub use courses::{
    Course, CourseDetailResponse, CourseResponse, CourseUpdatedResponse, CourseWithLecturer,
    CoursesResponse, CreateCourseRequest, DEFAULT_CAPACITY, LecturerInfo, NewCourse,
    OverloadType, PaymentStatus, Semester, UpdateCourseRequest,
};
pub use ids::{CourseId, UserId};
pub use notifications::{NotificationRequest, NotificationResponse};
pub use users::{NewUser, Role, User, UserSummary};
pub use value_types::{InstitutionalEmail, ValueTypeError, normalize_email};
