use courseload_auth::create_access_token;
use courseload_config::JwtConfig;
use courseload_core::{AppError, hash_password, verify_password};
use courseload_db::{StoreError, UserRepository};
use courseload_models::{
    AuthResponse, InstitutionalEmail, LoginRequest, NewUser, RegisterRequest, Role, UserSummary,
    normalize_email, required_text,
};
use tracing::{info, instrument, warn};

pub struct AuthService;

impl AuthService {
    /// Creates a lecturer account. Registration never grants QA.
    #[instrument(skip_all, fields(email = ?dto.email))]
    pub async fn register_user(
        users: &dyn UserRepository,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
        institutional_domain: &str,
    ) -> Result<AuthResponse, AppError> {
        let (
            Some(name),
            Some(email),
            Some(_),
            Some(bank_name),
            Some(bank_account_number),
            Some(bank_bban),
            Some(school),
        ) = (
            required_text(&dto.name),
            required_text(&dto.email),
            required_text(&dto.password),
            required_text(&dto.bank_name),
            required_text(&dto.bank_account_number),
            required_text(&dto.bank_bban),
            required_text(&dto.school),
        )
        else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "All fields are required."
            )));
        };

        let email = InstitutionalEmail::parse(email, institutional_domain).map_err(|err| {
            warn!(error = %err, "Registration rejected: email outside institutional domain");
            AppError::bad_request(err)
        })?;

        if users.find_by_email(email.as_str()).await?.is_some() {
            warn!(email = %email, "Registration rejected: email already registered");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email is already registered."
            )));
        }

        let password = dto.password.as_deref().unwrap_or_default();
        let password_hash = hash_password(password)?;

        let user = users
            .create(NewUser {
                name: name.to_string(),
                email,
                password_hash,
                role: Role::Lecturer,
                bank_name: bank_name.to_string(),
                bank_account_number: bank_account_number.to_string(),
                bank_bban: bank_bban.to_string(),
                school: school.to_string(),
            })
            .await
            .map_err(|err| duplicate_email(err, "Email is already registered."))?;

        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            message: "Registration successful.".to_string(),
            token,
            user: UserSummary::from(&user),
        })
    }

    #[instrument(skip_all, fields(email = ?dto.email))]
    pub async fn login_user(
        users: &dyn UserRepository,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let (Some(email), Some(_)) = (required_text(&dto.email), required_text(&dto.password))
        else {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email and password are required."
            )));
        };
        let password = dto.password.as_deref().unwrap_or_default();

        let Some((user, password_hash)) = users
            .find_credentials_by_email(&normalize_email(email))
            .await?
        else {
            warn!("Login failed: unknown email");
            return Err(invalid_credentials());
        };

        if !verify_password(password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");

        Ok(AuthResponse {
            message: "Login successful.".to_string(),
            token,
            user: UserSummary::from(&user),
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Invalid credentials."))
}

/// Maps a unique-email clash from the store onto the caller-facing message.
pub(crate) fn duplicate_email(err: StoreError, message: &'static str) -> AppError {
    match err {
        StoreError::Duplicate(_) => AppError::bad_request(anyhow::anyhow!(message)),
        other => other.into(),
    }
}
