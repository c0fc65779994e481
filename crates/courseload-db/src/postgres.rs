//! PostgreSQL store.
//!
//! Enumerations are stored as constrained `TEXT` columns and decoded through
//! the model types' own `sqlx` impls, so `query_as` maps rows straight onto
//! `User` and `Course`. Email uniqueness is enforced by the `users_email_key`
//! index and surfaced as [`StoreError::Duplicate`].

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use courseload_core::{StoreError, StoreResult};
use courseload_models::{Course, CourseId, NewCourse, NewUser, Role, User, UserId};
use sqlx::{FromRow, PgPool};

use crate::repository::{CourseRepository, UserRepository};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

const USER_COLUMNS: &str =
    "id, name, email, role, bank_name, bank_account_number, bank_bban, school, created_at";

const COURSE_COLUMNS: &str = "id, title, semester, enrolled, capacity, is_oversize, \
     oversize_student_count, is_overload, overload_type, payment_status, created_at, lecturer_id";

const DUPLICATE_EMAIL: &str = "Email is already registered.";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// A user row including the password hash, read only for login.
#[derive(FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("failed to run database migrations")?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, role, bank_name, \
             bank_account_number, bank_bban, school, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {USER_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&sql)
            .bind(UserId::new())
            .bind(&user.name)
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(&user.bank_name)
            .bind(&user.bank_account_number)
            .bind(&user.bank_bban)
            .bind(&user.school)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::Duplicate(DUPLICATE_EMAIL.to_string()))
            }
            Err(err) => Err(StoreError::Unexpected(
                anyhow::Error::new(err).context("failed to insert user"),
            )),
        }
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load user")?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load user by email")?;
        Ok(user)
    }

    async fn find_credentials_by_email(&self, email: &str) -> StoreResult<Option<(User, String)>> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, CredentialsRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load credentials")?;
        Ok(row.map(|row| (row.user, row.password_hash)))
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .context("failed to load users by id")?;
        Ok(users)
    }

    async fn list(&self) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list users")?;
        Ok(users)
    }

    async fn list_by_role(&self, role: Role) -> StoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at, id");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .fetch_all(&self.pool)
            .await
            .context("failed to list users by role")?;
        Ok(users)
    }

    async fn update_role(&self, id: UserId, role: Role) -> StoreResult<User> {
        let sql = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {USER_COLUMNS}");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(role)
            .fetch_optional(&self.pool)
            .await
            .context("failed to update user role")?
            .ok_or_else(|| StoreError::NotFound("User".to_string()))
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    async fn create(&self, course: NewCourse) -> StoreResult<Course> {
        let sql = format!(
            "INSERT INTO courses (id, title, semester, enrolled, capacity, is_oversize, \
             oversize_student_count, is_overload, overload_type, payment_status, created_at, \
             lecturer_id) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COURSE_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Course>(&sql)
            .bind(CourseId::new())
            .bind(&course.title)
            .bind(course.semester)
            .bind(course.enrolled)
            .bind(course.capacity)
            .bind(course.is_oversize)
            .bind(course.oversize_student_count)
            .bind(course.is_overload)
            .bind(course.overload_type)
            .bind(course.payment_status)
            .bind(Utc::now())
            .bind(course.lecturer)
            .fetch_one(&self.pool)
            .await
            .context("failed to insert course")?;
        Ok(created)
    }

    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("failed to load course")?;
        Ok(course)
    }

    async fn list(&self) -> StoreResult<Vec<Course>> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at, id");
        let courses = sqlx::query_as::<_, Course>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("failed to list courses")?;
        Ok(courses)
    }

    async fn save(&self, course: Course) -> StoreResult<Course> {
        let sql = format!(
            "UPDATE courses SET title = $2, semester = $3, enrolled = $4, capacity = $5, \
             is_oversize = $6, oversize_student_count = $7, is_overload = $8, \
             overload_type = $9, payment_status = $10 WHERE id = $1 RETURNING {COURSE_COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&sql)
            .bind(course.id)
            .bind(&course.title)
            .bind(course.semester)
            .bind(course.enrolled)
            .bind(course.capacity)
            .bind(course.is_oversize)
            .bind(course.oversize_student_count)
            .bind(course.is_overload)
            .bind(course.overload_type)
            .bind(course.payment_status)
            .fetch_optional(&self.pool)
            .await
            .context("failed to save course")?
            .ok_or_else(|| StoreError::NotFound("Course".to_string()))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.code().map(|code| code == "23505").unwrap_or(false);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseload_models::{InstitutionalEmail, OverloadType, PaymentStatus, Semester};

    fn lecturer(email: &str) -> NewUser {
        NewUser {
            name: "Jane Doe".to_string(),
            email: InstitutionalEmail::parse(email, "utg.edu.gm").unwrap(),
            password_hash: "hash".to_string(),
            role: Role::Lecturer,
            bank_name: "Trust Bank".to_string(),
            bank_account_number: "12345678".to_string(),
            bank_bban: "GM0012345678".to_string(),
            school: "School of ICT".to_string(),
        }
    }

    fn course(owner: UserId) -> NewCourse {
        NewCourse {
            title: "CS101".to_string(),
            semester: Semester::First,
            enrolled: 10,
            capacity: 30,
            is_oversize: false,
            oversize_student_count: 0,
            is_overload: true,
            overload_type: Some(OverloadType::Masters),
            payment_status: PaymentStatus::Pending,
            lecturer: owner,
        }
    }

    #[test]
    fn unique_violation_detects_only_db_codes() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn duplicate_email_is_rejected(pool: PgPool) {
        let store = PgStore::new(pool);
        UserRepository::create(&store, lecturer("jane@utg.edu.gm"))
            .await
            .unwrap();

        let err = UserRepository::create(&store, lecturer("jane@utg.edu.gm"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn credentials_lookup_returns_hash(pool: PgPool) {
        let store = PgStore::new(pool);
        let created = UserRepository::create(&store, lecturer("jane@utg.edu.gm"))
            .await
            .unwrap();

        let (user, hash) = store
            .find_credentials_by_email("jane@utg.edu.gm")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(hash, "hash");
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn course_round_trips_enums_and_saves(pool: PgPool) {
        let store = PgStore::new(pool);
        let owner = UserRepository::create(&store, lecturer("jane@utg.edu.gm"))
            .await
            .unwrap();

        let mut created = CourseRepository::create(&store, course(owner.id))
            .await
            .unwrap();
        assert_eq!(created.overload_type, Some(OverloadType::Masters));
        assert_eq!(created.lecturer, owner.id);

        created.is_overload = false;
        created.overload_type = None;
        created.payment_status = PaymentStatus::Approved;
        let saved = store.save(created.clone()).await.unwrap();
        assert_eq!(saved, created);

        let loaded = CourseRepository::find_by_id(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.payment_status, PaymentStatus::Approved);
        assert_eq!(loaded.overload_type, None);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn update_role_of_missing_user_is_not_found(pool: PgPool) {
        let store = PgStore::new(pool);
        let err = store.update_role(UserId::new(), Role::Qa).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
