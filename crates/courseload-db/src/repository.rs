//! Repository traits shared by every store.

use async_trait::async_trait;
use courseload_core::StoreResult;
use courseload_models::{Course, CourseId, NewCourse, NewUser, Role, User, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user. Fails with `StoreError::Duplicate` when the email is taken.
    async fn create(&self, user: NewUser) -> StoreResult<User>;
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;
    /// `email` must already be normalised.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// The user together with their password hash.
    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<(User, String)>>;
    async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;
    async fn list(&self) -> StoreResult<Vec<User>>;
    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>>;
    /// Fails with `StoreError::NotFound` when the user does not exist.
    async fn update_role(&self, id: UserId, role: Role) -> StoreResult<User>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: NewCourse) -> StoreResult<Course>;
    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>>;
    async fn list(&self) -> StoreResult<Vec<Course>>;
    /// Overwrites every mutable column of an existing course.
    async fn save(&self, course: Course) -> StoreResult<Course>;
}
