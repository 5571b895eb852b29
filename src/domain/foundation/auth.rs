//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is what the HTTP layer attaches to a request after a
//! bearer token has been validated through the `SessionValidator` port. It
//! carries only the claims the handlers use: the numeric identity and the
//! role string.

use super::UserId;
use thiserror::Error;

/// Role value granting access to catalog mutations.
pub const ADMIN_ROLE: &str = "admin";

/// Authenticated user extracted from a validated JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Numeric identity taken from the token subject.
    pub id: UserId,

    /// Role claim as issued, compared case-insensitively.
    pub role: String,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, role: impl Into<String>) -> Self {
        Self {
            id,
            role: role.into(),
        }
    }

    /// Returns true when the role claim is `admin`, ignoring ASCII case.
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}

/// Authentication errors that can occur while handling credentials.
///
/// The split between `InvalidToken` (401) and `TokenExpired` /
/// `InvalidSubject` (403) is observable by clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header on the request.
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Header present but not `Bearer <token>`.
    #[error("Invalid authorization format")]
    MalformedCredentials,

    /// Signature, encoding or claim structure is wrong.
    #[error("Invalid token")]
    InvalidToken,

    /// Token was valid once but its `exp` has passed.
    #[error("Token expired")]
    TokenExpired,

    /// Token subject is not a numeric user identity.
    #[error("Invalid user ID in token")]
    InvalidSubject,

    /// Authenticated but the role does not allow the action.
    #[error("Admin access required")]
    InsufficientPermissions,

    /// Token could not be produced (key or encoding failure).
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}

impl AuthError {
    /// Returns true if this error should be reported as 403 rather than 401.
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            AuthError::TokenExpired | AuthError::InvalidSubject | AuthError::InsufficientPermissions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(AuthenticatedUser::new(UserId::new(1), "ADMIN").is_admin());
        assert!(AuthenticatedUser::new(UserId::new(1), "Admin").is_admin());
        assert!(!AuthenticatedUser::new(UserId::new(1), "customer").is_admin());
    }

    #[test]
    fn expired_and_bad_subject_are_forbidden() {
        assert!(AuthError::TokenExpired.is_forbidden());
        assert!(AuthError::InvalidSubject.is_forbidden());
        assert!(!AuthError::InvalidToken.is_forbidden());
        assert!(!AuthError::MissingCredentials.is_forbidden());
    }

    #[test]
    fn auth_error_messages_match_client_contract() {
        assert_eq!(AuthError::MissingCredentials.to_string(), "Missing authorization header");
        assert_eq!(AuthError::MalformedCredentials.to_string(), "Invalid authorization format");
        assert_eq!(AuthError::InsufficientPermissions.to_string(), "Admin access required");
    }
}
