//! Course domain models and DTOs.

use crate::ids::{CourseId, UserId};
use crate::value_types::impl_text_enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Semester {
    First,
    Second,
}

impl_text_enum!(Semester {
    First => "First",
    Second => "Second",
});

/// Degree level of an overload course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum OverloadType {
    Masters,
    Bachelor,
}

impl_text_enum!(OverloadType {
    Masters => "Masters",
    Bachelor => "Bachelor",
});

/// `Paid` is a valid stored value but no operation moves a course into it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Approved,
    Paid,
}

impl_text_enum!(PaymentStatus {
    Pending => "Pending",
    Approved => "Approved",
    Paid => "Paid",
});

impl PaymentStatus {
    /// The approve action flips `Approved` back to `Pending` and anything else to `Approved`.
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Approved => PaymentStatus::Pending,
            _ => PaymentStatus::Approved,
        }
    }
}

pub const DEFAULT_CAPACITY: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    #[schema(example = "CS101")]
    pub title: String,
    pub semester: Semester,
    pub enrolled: i32,
    pub capacity: i32,
    pub is_oversize: bool,
    pub oversize_student_count: i32,
    pub is_overload: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overload_type: Option<OverloadType>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    /// Owning lecturer. Never changes after creation.
    #[sqlx(rename = "lecturer_id")]
    pub lecturer: UserId,
}

/// A course about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub semester: Semester,
    pub enrolled: i32,
    pub capacity: i32,
    pub is_oversize: bool,
    pub oversize_student_count: i32,
    pub is_overload: bool,
    pub overload_type: Option<OverloadType>,
    pub payment_status: PaymentStatus,
    pub lecturer: UserId,
}

/// Owner fields embedded in course reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LecturerInfo {
    pub id: UserId,
    pub name: String,
    pub school: String,
}

/// A course with its lecturer resolved, as returned by get, list and edit.
/// `lecturer` is null when the owner no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithLecturer {
    pub id: CourseId,
    pub title: String,
    pub semester: Semester,
    pub enrolled: i32,
    pub capacity: i32,
    pub is_oversize: bool,
    pub oversize_student_count: i32,
    pub is_overload: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overload_type: Option<OverloadType>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub lecturer: Option<LecturerInfo>,
}

impl Course {
    pub fn with_lecturer(self, lecturer: Option<LecturerInfo>) -> CourseWithLecturer {
        CourseWithLecturer {
            id: self.id,
            title: self.title,
            semester: self.semester,
            enrolled: self.enrolled,
            capacity: self.capacity,
            is_oversize: self.is_oversize,
            oversize_student_count: self.oversize_student_count,
            is_overload: self.is_overload,
            overload_type: self.overload_type,
            payment_status: self.payment_status,
            created_at: self.created_at,
            lecturer,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[schema(example = "CS101")]
    pub title: Option<String>,
    pub semester: Option<Semester>,
    #[validate(range(min = 0, message = "Enrolled students cannot be negative."))]
    #[schema(example = 10)]
    pub enrolled: Option<i32>,
    #[validate(range(min = 1, message = "Capacity must be at least 1."))]
    #[schema(example = 30)]
    pub capacity: Option<i32>,
    pub is_oversize: Option<bool>,
    #[validate(range(min = 0, message = "Student count cannot be negative."))]
    pub oversize_student_count: Option<i32>,
    pub is_overload: Option<bool>,
    pub overload_type: Option<OverloadType>,
    pub payment_status: Option<PaymentStatus>,
}

/// Partial course update. Every field is optional and applied independently.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub semester: Option<Semester>,
    #[validate(range(min = 0, message = "Enrolled students cannot be negative."))]
    pub enrolled: Option<i32>,
    #[validate(range(min = 1, message = "Capacity must be at least 1."))]
    pub capacity: Option<i32>,
    pub is_oversize: Option<bool>,
    #[validate(range(min = 0, message = "Student count cannot be negative."))]
    pub oversize_student_count: Option<i32>,
    pub is_overload: Option<bool>,
    pub overload_type: Option<OverloadType>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub message: String,
    pub course: Course,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseDetailResponse {
    pub course: CourseWithLecturer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseUpdatedResponse {
    pub message: String,
    pub course: CourseWithLecturer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoursesResponse {
    pub courses: Vec<CourseWithLecturer>,
}
