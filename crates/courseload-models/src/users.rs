//! User domain models.
//!
//! A [`User`] is either a lecturer or a QA administrator. The password hash
//! never lives on `User`; it only travels inside [`NewUser`] on the way into
//! the store and back out through the credential lookup.

use crate::ids::UserId;
use crate::value_types::{InstitutionalEmail, impl_text_enum};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// Account role. Lecturers own courses, QA reviews them and manages users.
///
/// `"User"` is accepted on input as the historical name of the lecturer role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[default]
    #[serde(alias = "User")]
    Lecturer,
    #[serde(rename = "QA")]
    Qa,
}

impl_text_enum!(Role {
    Lecturer => "Lecturer",
    Qa => "QA",
});

impl Role {
    /// Lenient parse used for request input, accepting the legacy `User` name.
    pub fn parse_input(value: &str) -> Option<Role> {
        match value.trim() {
            "User" => Some(Role::Lecturer),
            other => other.parse().ok(),
        }
    }
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[schema(example = "jane.doe@utg.edu.gm")]
    pub email: String,
    pub role: Role,
    pub bank_name: String,
    pub bank_account_number: String,
    #[serde(rename = "bankBBAN")]
    pub bank_bban: String,
    pub school: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The public part of a user returned alongside a token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub school: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            school: user.school.clone(),
        }
    }
}

/// A user ready to be inserted. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: InstitutionalEmail,
    pub password_hash: String,
    pub role: Role,
    pub bank_name: String,
    pub bank_account_number: String,
    pub bank_bban: String,
    pub school: String,
}

impl NewUser {
    pub const DEFAULT_BANK_NAME: &'static str = "Default Bank";
    pub const DEFAULT_BANK_ACCOUNT_NUMBER: &'static str = "00000000";
    pub const DEFAULT_BANK_BBAN: &'static str = "0000000000";
    pub const DEFAULT_SCHOOL: &'static str = "N/A";

    /// A QA account with placeholder bank details and no school.
    pub fn qa(name: impl Into<String>, email: InstitutionalEmail, password_hash: String) -> Self {
        Self {
            name: name.into(),
            email,
            password_hash,
            role: Role::Qa,
            bank_name: Self::DEFAULT_BANK_NAME.to_string(),
            bank_account_number: Self::DEFAULT_BANK_ACCOUNT_NUMBER.to_string(),
            bank_bban: Self::DEFAULT_BANK_BBAN.to_string(),
            school: Self::DEFAULT_SCHOOL.to_string(),
        }
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("school", &self.school)
            .finish_non_exhaustive()
    }
}
