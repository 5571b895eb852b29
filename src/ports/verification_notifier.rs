//! Delivery of email verification codes.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;

/// Sends the verification link for a freshly registered account.
#[async_trait]
pub trait VerificationNotifier: Send + Sync {
    async fn send_verification(&self, user: &User, code: &str) -> Result<(), DomainError>;
}
