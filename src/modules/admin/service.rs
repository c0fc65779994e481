use std::str::FromStr;

use courseload_auth::create_access_token;
use courseload_config::JwtConfig;
use courseload_core::{AppError, hash_password};
use courseload_db::UserRepository;
use courseload_models::{
    AssignRoleRequest, AuthResponse, CreateQaRequest, InstitutionalEmail, NewUser, Role, User,
    UserId, UserSummary, required_text,
};
use tracing::{info, instrument, warn};

use crate::modules::auth::service::duplicate_email;
use crate::utils::email::{Email, Mailer};

const QA_EXISTS: &str = "User already exists with this email.";

pub struct AdminService;

impl AdminService {
    /// Creates a QA account with placeholder bank and school details.
    #[instrument(skip_all, fields(email = ?dto.email))]
    pub async fn create_qa_user(
        users: &dyn UserRepository,
        dto: CreateQaRequest,
        jwt_config: &JwtConfig,
        institutional_domain: &str,
    ) -> Result<AuthResponse, AppError> {
        let (Some(name), Some(email), Some(_)) = (
            required_text(&dto.name),
            required_text(&dto.email),
            required_text(&dto.password),
        ) else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Name, email, and password are required."
            )));
        };

        let email = InstitutionalEmail::parse(email, institutional_domain).map_err(|err| {
            warn!(error = %err, "QA creation rejected: email outside institutional domain");
            AppError::bad_request(err)
        })?;

        if users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(QA_EXISTS)));
        }

        let password_hash = hash_password(dto.password.as_deref().unwrap_or_default())?;
        let user = users
            .create(NewUser::qa(name, email, password_hash))
            .await
            .map_err(|err| duplicate_email(err, QA_EXISTS))?;

        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        info!(user_id = %user.id, "QA user created");

        Ok(AuthResponse {
            message: "QA user created successfully.".to_string(),
            token,
            user: UserSummary::from(&user),
        })
    }

    /// Changes a user's role and tells them by email. A failed email is logged
    /// and does not undo the change.
    #[instrument(skip_all, fields(user_id = ?dto.user_id, role = ?dto.role))]
    pub async fn assign_role(
        users: &dyn UserRepository,
        mailer: &dyn Mailer,
        dto: AssignRoleRequest,
    ) -> Result<User, AppError> {
        let (Some(user_id), Some(role)) = (required_text(&dto.user_id), required_text(&dto.role))
        else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User ID and role are required."
            )));
        };

        let role = Role::parse_input(role).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!(
                "Invalid role. Must be either 'Lecturer' or 'QA'."
            ))
        })?;

        let Ok(user_id) = UserId::from_str(user_id) else {
            return Err(user_not_found());
        };
        if users.find_by_id(user_id).await?.is_none() {
            return Err(user_not_found());
        }

        let user = users.update_role(user_id, role).await?;
        info!(user_id = %user.id, role = %role, "Role assigned");

        if let Err(err) = mailer.send(Email::role_assignment(&user, role)).await {
            warn!(user_id = %user.id, error = %err.message(), "Role assignment email failed");
        }

        Ok(user)
    }

    #[instrument(skip_all)]
    pub async fn list_users(users: &dyn UserRepository) -> Result<Vec<User>, AppError> {
        Ok(users.list().await?)
    }
}

fn user_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("User not found."))
}
