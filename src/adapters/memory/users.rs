use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::RwLock;

use super::lock_poisoned;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{NewUser, User};
use crate::ports::UserRepository;

/// In-memory user accounts.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed account, e.g. a pre-verified admin.
    pub fn with_user(self, user: User) -> Self {
        if let Ok(mut users) = self.users.write() {
            users.push(user);
        }
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().map_err(lock_poisoned)?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("email {} already registered", user.email),
            ));
        }
        let next_id = users.iter().map(|u| u.id.value()).max().unwrap_or(0) + 1;
        let created = user.into_user(UserId::new(next_id), Utc::now());
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().map_err(lock_poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn consume_verification_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().map_err(lock_poisoned)?;
        let Some(user) = users
            .iter_mut()
            .find(|u| u.accepts_verification_code(code, now))
        else {
            return Ok(None);
        };
        user.mark_verified(now);
        Ok(Some(user.clone()))
    }
}
