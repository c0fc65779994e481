//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`] and expire after
//! [`JwtConfig::access_token_expiry`] seconds. There is no revocation list:
//! expiry is the only way a token stops being valid.
//!
//! # Example
//!
//! ```ignore
//! use courseload_auth::{create_access_token, verify_token};
//! use courseload_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//! let user_id = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use courseload_config::JwtConfig;
use courseload_core::AppError;

use crate::claims::Claims;

/// Signs a token identifying `user_id`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Decodes and validates a token, returning its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature does not match, the token
/// is malformed, or it has expired.
pub fn decode_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid token."))
}

/// Verifies a token and returns the identity it was issued for.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Uuid, AppError> {
    let claims = decode_token(token, jwt_config)?;
    Uuid::parse_str(&claims.sub).map_err(|_| AppError::unauthorized("Invalid token."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn expired_token(user_id: Uuid, config: &JwtConfig) -> String {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now - 120,
            iat: now - 3720,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_create_access_token_success() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), &config).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token_success() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, &config).unwrap();

        assert_eq!(verify_token(&token, &config).unwrap(), user_id);
    }

    #[test]
    fn test_token_expiry_uses_configured_lifetime() {
        let config = JwtConfig {
            access_token_expiry: 120,
            ..get_test_jwt_config()
        };

        let token = create_access_token(Uuid::new_v4(), &config).unwrap();
        let claims = decode_token(&token, &config).unwrap();

        assert_eq!(claims.exp - claims.iat, 120);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let token = expired_token(Uuid::new_v4(), &config);

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.message(), "Invalid token.");
    }

    #[test]
    fn test_verify_token_rejects_non_uuid_subject() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            exp: now + 60,
            iat: now,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(decode_token(&token, &config).is_ok());
        assert!(verify_token(&token, &config).is_err());
    }
}
