//! Registered user entity.
//!
//! # Invariants
//!
//! - `email` is stored trimmed and lower-cased, unique across users
//! - `password_hash` is a PHC string, never the raw password
//! - `verification_code` is present only while the account is unverified

use chrono::{DateTime, Utc};

use crate::domain::foundation::UserId;

/// Role assigned to self-registered accounts.
pub const DEFAULT_ROLE: &str = "customer";

/// A registered user as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_verified: bool,
    pub verification_code: Option<String>,
    pub verification_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true when `code` matches the pending code and has not expired.
    pub fn accepts_verification_code(&self, code: &str, now: DateTime<Utc>) -> bool {
        if self.is_verified {
            return false;
        }
        match (&self.verification_code, self.verification_expires_at) {
            (Some(pending), Some(expires_at)) => pending == code && now < expires_at,
            _ => false,
        }
    }

    /// Marks the account verified and consumes the pending code.
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.verification_code = None;
        self.verification_expires_at = None;
        self.updated_at = now;
    }
}

/// Everything needed to insert a freshly registered account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub verification_code: String,
    pub verification_expires_at: DateTime<Utc>,
}

impl NewUser {
    /// Materializes the record the way the database would return it.
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            is_verified: false,
            verification_code: Some(self.verification_code),
            verification_expires_at: Some(self.verification_expires_at),
            created_at: now,
            updated_at: now,
        }
    }
}
