//! User repository port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{NewUser, User};

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find an account by its normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Atomically verify the account holding `code`, if the code has not
    /// expired at `now`, and clear the code.
    ///
    /// Returns the verified account, or `None` when no unexpired account
    /// holds the code. Two concurrent calls with the same code verify at
    /// most once.
    async fn consume_verification_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError>;
}
