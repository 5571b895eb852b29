//! Request and response bodies for the user endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, ValidationError};
use crate::domain::user::{validate_email, validate_password, User};
use crate::ports::{LoginUser, RegisterUser};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// Required-field and format checks made before the service is called.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        RegisterUser {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(())
    }
}

impl From<LoginRequest> for LoginUser {
    fn from(req: LoginRequest) -> Self {
        LoginUser {
            email: req.email,
            password: req.password,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Public view of an account. Never includes the hash or verification code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            is_verified: user.is_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
