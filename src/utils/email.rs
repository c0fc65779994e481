//! Outbound mail.
//!
//! Handlers depend on the [`Mailer`] trait, built once at startup by
//! [`build_mailer`]. With SMTP disabled the [`LogMailer`] records each message
//! in the log instead of sending it.

use std::sync::Arc;

use async_trait::async_trait;
use courseload_config::EmailConfig;
use courseload_core::AppError;
use courseload_models::{Role, User};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

/// A plain-text message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    pub fn notification(user: &User, message: &str) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Notification from QA".to_string(),
            body: format!(
                "Hello {},\n\n{}\n\nBest regards,\nQA Team",
                user.name, message
            ),
        }
    }

    pub fn role_assignment(user: &User, role: Role) -> Self {
        Self {
            to: user.email.clone(),
            subject: "Role Assignment Notification".to_string(),
            body: format!(
                "Hello {},\n\nYour role has been updated to '{}'.\n\nBest regards,\nQA Team",
                user.name, role
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Email) -> Result<(), AppError>;
}

pub struct SmtpMailer {
    from: String,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, AppError> {
        let transport = if config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );

            SmtpTransport::relay(&config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            from: format!("{} <{}>", config.from_name, config.from_email),
            transport,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject))]
    async fn send(&self, email: Email) -> Result<(), AppError> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body)
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| {
                AppError::internal_error(format!("Failed to send email to {}: {}", email.to, e))
            })?;

        info!("Email sent");
        Ok(())
    }
}

/// Stands in for SMTP when delivery is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "Email delivery disabled, message not sent"
        );
        Ok(())
    }
}

pub fn build_mailer(config: &EmailConfig) -> Result<Arc<dyn Mailer>, AppError> {
    if config.enabled {
        info!(host = %config.smtp_host, port = config.smtp_port, "SMTP delivery enabled");
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        info!("SMTP delivery disabled, emails will only be logged");
        Ok(Arc::new(LogMailer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use courseload_models::UserId;

    fn lecturer() -> User {
        User {
            id: UserId::new(),
            name: "Jane Doe".to_string(),
            email: "jane.doe@utg.edu.gm".to_string(),
            role: Role::Lecturer,
            bank_name: "Trust Bank".to_string(),
            bank_account_number: "12345678".to_string(),
            bank_bban: "GM0012345678".to_string(),
            school: "School of ICT".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_notification_body() {
        let email = Email::notification(&lecturer(), "Forms are due Friday.");
        assert_eq!(email.to, "jane.doe@utg.edu.gm");
        assert_eq!(email.subject, "Notification from QA");
        assert_eq!(
            email.body,
            "Hello Jane Doe,\n\nForms are due Friday.\n\nBest regards,\nQA Team"
        );
    }

    #[test]
    fn test_role_assignment_body_names_the_role() {
        let email = Email::role_assignment(&lecturer(), Role::Qa);
        assert_eq!(email.subject, "Role Assignment Notification");
        assert!(email.body.contains("Your role has been updated to 'QA'."));
    }

    #[tokio::test]
    async fn test_log_mailer_accepts_everything() {
        let email = Email::notification(&lecturer(), "hi");
        assert!(LogMailer.send(email).await.is_ok());
    }

    #[test]
    fn test_disabled_config_builds_log_mailer() {
        let config = EmailConfig {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@utg.edu.gm".to_string(),
            from_name: "Courseload".to_string(),
        };
        assert!(build_mailer(&config).is_ok());
    }
}
