//! Validated value types and the text-backed enumeration helper.
//!
//! # Example
//!
//! ```ignore
//! use courseload_models::value_types::InstitutionalEmail;
//!
//! let email = InstitutionalEmail::parse("  Jane.Doe@UTG.edu.gm ", "utg.edu.gm").unwrap();
//! assert_eq!(email.as_str(), "jane.doe@utg.edu.gm");
//! ```

use std::fmt;
use validator::ValidateEmail;

/// Error type for value type parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTypeError {
    /// The email address is empty or malformed.
    InvalidEmail(String),
    /// The email address is well formed but outside the institutional domain.
    NotInstitutional { domain: String },
    /// A text value did not name any variant of an enumeration.
    InvalidVariant { kind: &'static str, value: String },
}

impl std::error::Error for ValueTypeError {}

impl fmt::Display for ValueTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            Self::NotInstitutional { domain } => {
                write!(f, "Please use a valid @{} email address.", domain)
            }
            Self::InvalidVariant { kind, value } => {
                write!(f, "'{}' is not a valid {}.", value, kind)
            }
        }
    }
}

/// An email address normalised to lower case and restricted to one domain.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InstitutionalEmail(String);

impl InstitutionalEmail {
    /// Trim, lower-case and check `raw` against `@<domain>`.
    pub fn parse(raw: &str, domain: &str) -> Result<Self, ValueTypeError> {
        let email = normalize_email(raw);

        if email.is_empty() {
            return Err(ValueTypeError::InvalidEmail("email cannot be empty".into()));
        }

        if !email.validate_email() {
            return Err(ValueTypeError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                email
            )));
        }

        let suffix = format!("@{}", domain.trim().to_lowercase());
        match email.strip_suffix(&suffix) {
            Some(local) if !local.is_empty() => Ok(Self(email)),
            _ => Err(ValueTypeError::NotInstitutional {
                domain: domain.trim().to_lowercase(),
            }),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for InstitutionalEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstitutionalEmail({})", self.0)
    }
}

impl fmt::Display for InstitutionalEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<InstitutionalEmail> for String {
    fn from(email: InstitutionalEmail) -> String {
        email.0
    }
}

/// Emails are stored and looked up in this form.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Implements `as_str`, `Display`, `FromStr` and the Postgres `TEXT` mapping
/// for a fieldless enum. Serde and OpenAPI naming stay on the enum itself.
macro_rules! impl_text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::value_types::ValueTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err($crate::value_types::ValueTypeError::InvalidVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let text = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
                Ok(text.parse::<$name>()?)
            }
        }
    };
}

pub(crate) use impl_text_enum;

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &str = "utg.edu.gm";

    #[test]
    fn test_institutional_email_is_normalised() {
        let email = InstitutionalEmail::parse("  Jane.Doe@UTG.edu.gm ", DOMAIN).unwrap();
        assert_eq!(email.as_str(), "jane.doe@utg.edu.gm");
    }

    #[test]
    fn test_foreign_domain_is_rejected() {
        let err = InstitutionalEmail::parse("jane@gmail.com", DOMAIN).unwrap_err();
        assert_eq!(
            err,
            ValueTypeError::NotInstitutional {
                domain: DOMAIN.to_string()
            }
        );
        assert_eq!(err.to_string(), "Please use a valid @utg.edu.gm email address.");
    }

    #[test]
    fn test_lookalike_domain_is_rejected() {
        assert!(InstitutionalEmail::parse("jane@notutg.edu.gm", DOMAIN).is_err());
        assert!(InstitutionalEmail::parse("jane@utg.edu.gm.evil.com", DOMAIN).is_err());
    }

    #[test]
    fn test_empty_and_malformed_emails_are_rejected() {
        assert!(matches!(
            InstitutionalEmail::parse("   ", DOMAIN),
            Err(ValueTypeError::InvalidEmail(_))
        ));
        assert!(matches!(
            InstitutionalEmail::parse("@utg.edu.gm", DOMAIN),
            Err(ValueTypeError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_domain_is_configurable() {
        let email = InstitutionalEmail::parse("lecturer@uni.example", "uni.example").unwrap();
        assert_eq!(email.to_string(), "lecturer@uni.example");
    }
}
