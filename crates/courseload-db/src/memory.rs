//! In-memory store.
//!
//! Users and courses live in `HashMap`s behind `tokio::sync::RwLock`, with an
//! insertion-order index so listings are stable. Nothing survives a restart.
//! Email uniqueness is checked and the row inserted under one write lock.

use async_trait::async_trait;
use chrono::Utc;
use courseload_core::{StoreError, StoreResult};
use courseload_models::{Course, CourseId, NewCourse, NewUser, Role, User, UserId};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::repository::{CourseRepository, UserRepository};

/// Rows keyed by id, remembering insertion order.
#[derive(Debug)]
struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K: Copy + Eq + Hash, V: Clone> Table<K, V> {
    fn insert(&mut self, key: K, value: V) {
        if self.rows.insert(key, value).is_none() {
            self.order.push(key);
        }
    }

    fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<Table<UserId, StoredUser>>>,
    courses: Arc<RwLock<Table<CourseId, Course>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|stored| stored.user.email == user.email.as_str())
        {
            return Err(StoreError::Duplicate(
                "Email is already registered.".to_string(),
            ));
        }

        let created = User {
            id: UserId::new(),
            name: user.name,
            email: user.email.into_inner(),
            role: user.role,
            bank_name: user.bank_name,
            bank_account_number: user.bank_account_number,
            bank_bban: user.bank_bban,
            school: user.school,
            created_at: Utc::now(),
        };
        users.insert(
            created.id,
            StoredUser {
                user: created.clone(),
                password_hash: user.password_hash,
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .find_credentials_by_email(email)
            .await?
            .map(|(user, _)| user))
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<(User, String)>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|stored| stored.user.email == email)
            .map(|stored| (stored.user.clone(), stored.password_hash.clone())))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|stored| ids.contains(&stored.user.id))
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().map(|stored| stored.user.clone()).collect())
    }

    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|stored| stored.user.role == role)
            .map(|stored| stored.user.clone())
            .collect())
    }

    async fn update_role(&self, id: UserId, role: Role) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let stored = users
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound("User".to_string()))?;
        stored.user.role = role;
        Ok(stored.user.clone())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn create(&self, course: NewCourse) -> StoreResult<Course> {
        let created = Course {
            id: CourseId::new(),
            title: course.title,
            semester: course.semester,
            enrolled: course.enrolled,
            capacity: course.capacity,
            is_oversize: course.is_oversize,
            oversize_student_count: course.oversize_student_count,
            is_overload: course.is_overload,
            overload_type: course.overload_type,
            payment_status: course.payment_status,
            created_at: Utc::now(),
            lecturer: course.lecturer,
        };
        self.courses.write().await.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        Ok(self.courses.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Course>> {
        Ok(self.courses.read().await.values().cloned().collect())
    }

    async fn save(&self, course: Course) -> StoreResult<Course> {
        let mut courses = self.courses.write().await;
        let existing = courses
            .rows
            .get_mut(&course.id)
            .ok_or_else(|| StoreError::NotFound("Course".to_string()))?;
        // Owner and creation time are fixed at insert.
        *existing = Course {
            lecturer: existing.lecturer,
            created_at: existing.created_at,
            ..course
        };
        Ok(existing.clone())
    }
}
