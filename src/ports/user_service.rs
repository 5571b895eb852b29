//! User service port consumed by the user HTTP handlers.

use async_trait::async_trait;

use crate::domain::user::{User, UserError};

use super::IssuedToken;

/// Registration input, already bound from the request body.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Login input, already bound from the request body.
#[derive(Debug, Clone)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Account lifecycle operations.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an unverified account and send its verification code.
    async fn register(&self, request: RegisterUser) -> Result<User, UserError>;

    /// Check credentials and issue an access token.
    async fn login(&self, request: LoginUser) -> Result<(IssuedToken, User), UserError>;

    /// Consume a verification code. Succeeds at most once per code.
    async fn verify_email(&self, code: &str) -> Result<(), UserError>;
}
