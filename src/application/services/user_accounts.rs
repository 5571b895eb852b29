//! UserAccounts - registration, login and email verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::user::{
    normalize_email, validate_email, validate_password, NewUser, User, UserError, DEFAULT_ROLE,
};
use crate::domain::foundation::ValidationError;
use crate::ports::{
    IssuedToken, LoginUser, PasswordHasher, RegisterUser, TokenIssuer, UserRepository,
    UserService, VerificationNotifier,
};

/// `UserService` backed by a user repository.
pub struct UserAccounts {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
    notifier: Arc<dyn VerificationNotifier>,
    verification_ttl: Duration,
}

impl UserAccounts {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
        notifier: Arc<dyn VerificationNotifier>,
        verification_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
            notifier,
            verification_ttl,
        }
    }
}

#[async_trait]
impl UserService for UserAccounts {
    async fn register(&self, request: RegisterUser) -> Result<User, UserError> {
        let full_name = request.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name").into());
        }
        validate_email(&request.email)?;
        validate_password(&request.password)?;

        let email = normalize_email(&request.email);
        let password_hash = self.hasher.hash(&request.password).await?;
        let code = Uuid::new_v4().simple().to_string();

        let user = self
            .repository
            .create(NewUser {
                full_name,
                email: email.clone(),
                password_hash,
                role: DEFAULT_ROLE.to_string(),
                verification_code: code.clone(),
                verification_expires_at: Utc::now() + self.verification_ttl,
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    UserError::EmailAlreadyRegistered(email.clone())
                } else {
                    UserError::from(e)
                }
            })?;

        tracing::info!(user_id = %user.id, "User registered");

        if let Err(e) = self.notifier.send_verification(&user, &code).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to send verification email");
        }

        Ok(user)
    }

    async fn login(&self, request: LoginUser) -> Result<(IssuedToken, User), UserError> {
        let email = normalize_email(&request.email);
        let Some(user) = self.repository.find_by_email(&email).await? else {
            tracing::debug!("Login attempt for unknown email");
            return Err(UserError::InvalidCredentials);
        };

        if !self.hasher.verify(&request.password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        if !user.is_verified {
            return Err(UserError::EmailNotVerified);
        }

        let token = self
            .tokens
            .issue(&user)
            .map_err(|e| UserError::infrastructure(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok((token, user))
    }

    async fn verify_email(&self, code: &str) -> Result<(), UserError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(UserError::InvalidVerificationCode);
        }

        match self
            .repository
            .consume_verification_code(code, Utc::now())
            .await?
        {
            Some(user) => {
                tracing::info!(user_id = %user.id, "Email verified");
                Ok(())
            }
            None => Err(UserError::InvalidVerificationCode),
        }
    }
}
