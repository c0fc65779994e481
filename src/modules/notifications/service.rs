use std::sync::Arc;

use courseload_core::AppError;
use courseload_db::UserRepository;
use courseload_models::{NotificationRequest, NotificationResponse, Role, required_text};
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

use crate::utils::email::{Email, Mailer};

pub struct NotificationService;

impl NotificationService {
    /// Emails `message` to every lecturer.
    ///
    /// Deliveries run concurrently and independently. A failed delivery is
    /// logged and counted but never fails the call; only loading the
    /// recipients can.
    #[instrument(skip_all)]
    pub async fn send_to_all_lecturers(
        users: &dyn UserRepository,
        mailer: Arc<dyn Mailer>,
        dto: NotificationRequest,
    ) -> Result<NotificationResponse, AppError> {
        let Some(message) = required_text(&dto.message) else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Notification message is required."
            )));
        };

        let lecturers = users.list_by_role(Role::Lecturer).await?;
        if lecturers.is_empty() {
            info!("No lecturers to notify");
            return Ok(NotificationResponse::no_recipients());
        }

        let recipients = lecturers.len();
        let mut deliveries = JoinSet::new();
        for lecturer in &lecturers {
            let mailer = Arc::clone(&mailer);
            let email = Email::notification(lecturer, message);
            deliveries.spawn(async move {
                let to = email.to.clone();
                (to, mailer.send(email).await)
            });
        }

        let mut failed = 0;
        while let Some(joined) = deliveries.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((to, Err(err))) => {
                    failed += 1;
                    warn!(to = %to, error = %err.message(), "Notification delivery failed");
                }
                Err(err) => {
                    failed += 1;
                    error!(error = %err, "Notification task aborted");
                }
            }
        }

        info!(recipients, failed, "Notifications dispatched");
        Ok(NotificationResponse::delivered(recipients, failed))
    }
}
