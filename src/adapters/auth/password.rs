//! Argon2id password hashing.
//!
//! Argon2 is CPU-bound for hundreds of milliseconds, so the port methods run
//! it on the blocking pool. The async caller can then time out and move on.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use password_hash::rand_core::OsRng;
use tokio::task;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// `PasswordHasher` using Argon2id with default parameters and a random salt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes on the calling thread. For seeding and tools outside the
    /// request path.
    pub fn hash_blocking(password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("hash password: {}", e)))
    }

    /// Verifies on the calling thread.
    pub fn verify_blocking(password: &str, hash: &str) -> Result<bool, DomainError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("stored hash unreadable: {}", e))
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

fn join_failed(err: task::JoinError) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("password hashing task failed: {}", err),
    )
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        task::spawn_blocking(move || Self::hash_blocking(&password))
            .await
            .map_err(join_failed)?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        task::spawn_blocking(move || Self::verify_blocking(&password, &hash))
            .await
            .map_err(join_failed)?
    }
}
