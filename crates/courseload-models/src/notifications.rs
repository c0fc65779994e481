//! Notification broadcast bodies.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct NotificationRequest {
    #[validate(length(min = 1, message = "Notification message is required."))]
    #[schema(example = "Course load forms are due on Friday.")]
    pub message: Option<String>,
}

/// Outcome of a broadcast. The counts are absent when there was nobody to notify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipients: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
}

impl NotificationResponse {
    pub fn no_recipients() -> Self {
        Self {
            message: "No users to send notifications to.".to_string(),
            recipients: None,
            delivered: None,
            failed: None,
        }
    }

    pub fn delivered(recipients: usize, failed: usize) -> Self {
        Self {
            message: "Notifications sent successfully.".to_string(),
            recipients: Some(recipients),
            delivered: Some(recipients - failed),
            failed: Some(failed),
        }
    }
}
