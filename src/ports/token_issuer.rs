//! Token issuing port, used by login.

use chrono::{DateTime, Utc};

use crate::domain::foundation::AuthError;
use crate::domain::user::User;

/// A signed access token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues access tokens that a matching `SessionValidator` accepts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError>;
}
