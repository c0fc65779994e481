use std::collections::HashMap;
use std::str::FromStr;

use courseload_core::AppError;
use courseload_db::{CourseRepository, UserRepository};
use courseload_models::{
    Course, CourseId, CourseWithLecturer, CreateCourseRequest, LecturerInfo, PaymentStatus,
    UpdateCourseRequest, User, UserId,
};
use tracing::{info, instrument, warn};

use super::policy;
use crate::middleware::auth::AuthUser;

pub struct CourseService;

impl CourseService {
    #[instrument(skip_all, fields(actor = %actor.id))]
    pub async fn create_course(
        courses: &dyn CourseRepository,
        actor: &AuthUser,
        dto: CreateCourseRequest,
    ) -> Result<Course, AppError> {
        let new_course = policy::new_course(actor, dto)?;
        let course = courses.create(new_course).await?;
        info!(course_id = %course.id, title = %course.title, "Course created");
        Ok(course)
    }

    #[instrument(skip_all, fields(actor = %actor.id, course_id = %course_id))]
    pub async fn update_course(
        courses: &dyn CourseRepository,
        users: &dyn UserRepository,
        actor: &AuthUser,
        course_id: &str,
        dto: UpdateCourseRequest,
    ) -> Result<CourseWithLecturer, AppError> {
        let mut course = Self::load(courses, course_id).await?;

        policy::ensure_can_edit(actor, &course).inspect_err(|_| {
            warn!(course_id = %course.id, owner = %course.lecturer, "Edit rejected: not the owner");
        })?;
        policy::apply_update(actor, &mut course, dto)?;

        let course = courses.save(course).await?;
        info!(course_id = %course.id, "Course updated");
        Self::with_lecturer(users, course).await
    }

    /// Toggles payment approval. The role check happens before the lookup.
    #[instrument(skip_all, fields(actor = %actor.id, course_id = %course_id))]
    pub async fn approve_course(
        courses: &dyn CourseRepository,
        actor: &AuthUser,
        course_id: &str,
    ) -> Result<(Course, PaymentStatus), AppError> {
        policy::ensure_can_approve(actor)?;

        let mut course = Self::load(courses, course_id).await?;
        let status = policy::toggle_approval(&mut course);
        let course = courses.save(course).await?;

        info!(course_id = %course.id, status = %status, "Course payment status updated");
        Ok((course, status))
    }

    #[instrument(skip(courses, users))]
    pub async fn get_course(
        courses: &dyn CourseRepository,
        users: &dyn UserRepository,
        course_id: &str,
    ) -> Result<CourseWithLecturer, AppError> {
        let course = Self::load(courses, course_id).await?;
        Self::with_lecturer(users, course).await
    }

    #[instrument(skip_all)]
    pub async fn list_courses(
        courses: &dyn CourseRepository,
        users: &dyn UserRepository,
    ) -> Result<Vec<CourseWithLecturer>, AppError> {
        let courses = courses.list().await?;

        let mut lecturer_ids: Vec<UserId> = courses.iter().map(|c| c.lecturer).collect();
        lecturer_ids.sort_by_key(|id| id.into_inner());
        lecturer_ids.dedup();

        let lecturers: HashMap<UserId, LecturerInfo> = users
            .find_by_ids(&lecturer_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, lecturer_info(user)))
            .collect();

        Ok(courses
            .into_iter()
            .map(|course| {
                let lecturer = lecturers.get(&course.lecturer).cloned();
                course.with_lecturer(lecturer)
            })
            .collect())
    }

    /// An id that does not parse can name no course, so both cases are a 404.
    async fn load(courses: &dyn CourseRepository, course_id: &str) -> Result<Course, AppError> {
        let Ok(id) = CourseId::from_str(course_id) else {
            return Err(course_not_found());
        };
        courses.find_by_id(id).await?.ok_or_else(course_not_found)
    }

    async fn with_lecturer(
        users: &dyn UserRepository,
        course: Course,
    ) -> Result<CourseWithLecturer, AppError> {
        let lecturer = users.find_by_id(course.lecturer).await?.map(lecturer_info);
        Ok(course.with_lecturer(lecturer))
    }
}

fn lecturer_info(user: User) -> LecturerInfo {
    LecturerInfo {
        id: user.id,
        name: user.name,
        school: user.school,
    }
}

fn course_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Course not found."))
}
