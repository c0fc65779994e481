//! Field-level rules for creating, editing and approving courses.
//!
//! Every role and ownership decision about a course is made here. The rules
//! are pure: they take the caller and the request, and either produce the
//! record to persist or an [`AppError`] describing why the caller may not.
//!
//! - Lecturers and QA users may create courses; the creator becomes the owner.
//! - The owner or any QA user may edit a course. `paymentStatus` in an edit is
//!   applied for QA callers only and silently ignored for everyone else.
//! - Only QA users may approve. Approval toggles between `Approved` and
//!   `Pending`; `Paid` is never produced.
//! - An overload course always carries an overload type. Clearing the overload
//!   flag clears the type.

use courseload_core::AppError;
use courseload_models::{
    Course, CreateCourseRequest, NewCourse, PaymentStatus, UpdateCourseRequest, required_text,
};
use tracing::debug;

use crate::middleware::auth::AuthUser;

const MISSING_COURSE_FIELDS: &str = "Title, semester, enrolled, and capacity fields are required.";
const OVERLOAD_TYPE_REQUIRED: &str = "Overload type is required for overload courses.";

/// Builds the course a caller asked to create, owned by that caller.
///
/// A `paymentStatus` supplied at creation is kept as given, whatever the
/// caller's role.
pub fn new_course(actor: &AuthUser, req: CreateCourseRequest) -> Result<NewCourse, AppError> {
    let (Some(title), Some(semester), Some(enrolled), Some(capacity)) = (
        required_text(&req.title),
        req.semester,
        req.enrolled,
        req.capacity,
    ) else {
        return Err(AppError::bad_request(anyhow::anyhow!(MISSING_COURSE_FIELDS)));
    };

    let is_overload = req.is_overload.unwrap_or(false);
    let overload_type = if is_overload { req.overload_type } else { None };
    if is_overload && overload_type.is_none() {
        return Err(AppError::bad_request(anyhow::anyhow!(OVERLOAD_TYPE_REQUIRED)));
    }

    Ok(NewCourse {
        title: title.to_string(),
        semester,
        enrolled,
        capacity,
        is_oversize: req.is_oversize.unwrap_or(false),
        oversize_student_count: req.oversize_student_count.unwrap_or(0),
        is_overload,
        overload_type,
        payment_status: req.payment_status.unwrap_or_default(),
        lecturer: actor.id,
    })
}

pub fn ensure_can_edit(actor: &AuthUser, course: &Course) -> Result<(), AppError> {
    if actor.id == course.lecturer || actor.is_qa() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Access denied. You can only edit your own courses.",
        ))
    }
}

pub fn ensure_can_approve(actor: &AuthUser) -> Result<(), AppError> {
    if actor.is_qa() {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied. Only QA can approve courses."))
    }
}

/// Applies a partial update to `course` on behalf of `actor`.
///
/// The caller must already have passed [`ensure_can_edit`]. On error the
/// course may be partially modified and must not be saved.
pub fn apply_update(
    actor: &AuthUser,
    course: &mut Course,
    req: UpdateCourseRequest,
) -> Result<(), AppError> {
    if let Some(title) = &req.title {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Course title cannot be empty."
            )));
        }
        course.title = title.to_string();
    }
    if let Some(semester) = req.semester {
        course.semester = semester;
    }
    if let Some(capacity) = req.capacity {
        course.capacity = capacity;
    }
    if let Some(enrolled) = req.enrolled {
        course.enrolled = enrolled;
    }
    if let Some(is_oversize) = req.is_oversize {
        course.is_oversize = is_oversize;
    }
    if let Some(count) = req.oversize_student_count {
        course.oversize_student_count = count;
    }

    if let Some(is_overload) = req.is_overload {
        course.is_overload = is_overload;
        if !is_overload {
            course.overload_type = None;
        }
    }
    // Only an explicit isOverload=true in the same request admits a new type.
    if req.is_overload == Some(true) && req.overload_type.is_some() {
        course.overload_type = req.overload_type;
    }
    if course.is_overload && course.overload_type.is_none() {
        return Err(AppError::bad_request(anyhow::anyhow!(OVERLOAD_TYPE_REQUIRED)));
    }

    if let Some(status) = req.payment_status {
        if actor.is_qa() {
            course.payment_status = status;
        } else {
            debug!(user_id = %actor.id, "Ignoring paymentStatus from non-QA editor");
        }
    }

    Ok(())
}

/// Flips payment approval and returns the new status.
pub fn toggle_approval(course: &mut Course) -> PaymentStatus {
    course.payment_status = course.payment_status.toggled();
    course.payment_status
}
