//! Request and response bodies for registration, login and user administration.
//!
//! Required text fields are `Option<String>` so that an absent field and an
//! empty one produce the same 400 message instead of a deserialization error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::{User, UserSummary};

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "All fields are required."))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "All fields are required."))]
    #[schema(example = "jane.doe@utg.edu.gm")]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "All fields are required."))]
    #[schema(example = "password123")]
    pub password: Option<String>,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub bank_name: Option<String>,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub bank_account_number: Option<String>,
    #[serde(rename = "bankBBAN")]
    #[validate(length(min = 1, message = "All fields are required."))]
    pub bank_bban: Option<String>,
    #[validate(length(min = 1, message = "All fields are required."))]
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required."))]
    #[schema(example = "jane.doe@utg.edu.gm")]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Email and password are required."))]
    #[schema(example = "password123")]
    pub password: Option<String>,
}

/// Token plus the public user fields, returned by register, login and create-qa.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateQaRequest {
    #[validate(length(min = 1, message = "Name, email, and password are required."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Name, email, and password are required."))]
    #[schema(example = "qa.officer@utg.edu.gm")]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "Name, email, and password are required."))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoleRequest {
    #[validate(length(min = 1, message = "User ID and role are required."))]
    pub user_id: Option<String>,
    #[validate(length(min = 1, message = "User ID and role are required."))]
    #[schema(example = "QA")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignRoleResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trimmed value of a required text field, or `None` when absent or blank.
pub fn required_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
