//! Session validation port for bearer token validation.
//!
//! HTTP middleware uses this port to turn the raw token from the
//! `Authorization` header into an `AuthenticatedUser`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature
/// - Validate the expiry claim
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::InvalidSubject` when the subject is not a numeric id
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;

    struct FixedTokens {
        tokens: HashMap<String, AuthenticatedUser>,
    }

    #[async_trait]
    impl SessionValidator for FixedTokens {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe_and_usable_behind_dyn() {
        let mut tokens = HashMap::new();
        tokens.insert(
            "good".to_string(),
            AuthenticatedUser::new(UserId::new(5), "admin"),
        );
        let validator: Box<dyn SessionValidator> = Box::new(FixedTokens { tokens });

        let user = validator.validate("good").await.unwrap();
        assert_eq!(user.id, UserId::new(5));
        assert_eq!(validator.validate("bad").await, Err(AuthError::InvalidToken));
    }
}
