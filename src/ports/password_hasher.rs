//! Password hashing port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// One-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing string.
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` on mismatch; `Err` only when `hash` is unreadable.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
