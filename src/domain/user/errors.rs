//! User-account error types.
//!
//! # HTTP Status Mapping
//!
//! Status depends on the endpoint rather than the variant: registration
//! reports every failure as 400, login as 401. Email verification maps
//! `InvalidVerificationCode` to 401 and everything else to 500.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors returned by the user service port.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UserError {
    /// Registration input failed a field rule.
    #[error("{0}")]
    Validation(ValidationError),

    /// Another account already uses this email.
    #[error("email {0} is already registered")]
    EmailAlreadyRegistered(String),

    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Credentials are right but the email has not been verified yet.
    #[error("email is not verified, please check your inbox")]
    EmailNotVerified,

    /// Code unknown, expired, or already consumed.
    #[error("verification code is invalid or expired")]
    InvalidVerificationCode,

    /// Storage, hashing, signing or timeout failure.
    #[error("{0}")]
    Infrastructure(String),
}

impl UserError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        UserError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::Validation(_) => ErrorCode::ValidationFailed,
            UserError::EmailAlreadyRegistered(_) => ErrorCode::Conflict,
            UserError::InvalidCredentials | UserError::InvalidVerificationCode => {
                ErrorCode::Unauthorized
            }
            UserError::EmailNotVerified => ErrorCode::Forbidden,
            UserError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a client-facing error message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::Validation(err)
    }
}

impl From<DomainError> for UserError {
    fn from(err: DomainError) -> Self {
        UserError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_message_mentions_invalid_or_expired() {
        assert!(UserError::InvalidVerificationCode
            .to_string()
            .contains("invalid or expired"));
    }

    #[test]
    fn credentials_error_does_not_reveal_which_part_failed() {
        assert_eq!(UserError::InvalidCredentials.to_string(), "invalid email or password");
    }

    #[test]
    fn domain_errors_become_infrastructure() {
        let err: UserError = DomainError::new(ErrorCode::Timeout, "timed out").into();
        assert!(matches!(err, UserError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
