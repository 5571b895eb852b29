//! Authentication configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 tokens, email verification)
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign and verify access tokens
    pub jwt_secret: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: i64,

    /// Verification code lifetime in seconds
    #[serde(default = "default_verification_code_ttl")]
    pub verification_code_ttl_secs: i64,

    /// Public URL of the verification endpoint; the code is appended
    #[serde(default = "default_verification_url")]
    pub verification_url: String,
}

impl AuthConfig {
    /// Secret wrapped so it never lands in logs
    pub fn jwt_secret(&self) -> SecretString {
        SecretString::new(self.jwt_secret.clone())
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.token_ttl_secs)
    }

    pub fn verification_code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.verification_code_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("GREEN_MARKET__AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_BYTES
        {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.token_ttl_secs <= 0 || self.verification_code_ttl_secs <= 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("verification_code_ttl_secs", &self.verification_code_ttl_secs)
            .field("verification_url", &self.verification_url)
            .finish()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            verification_code_ttl_secs: default_verification_code_ttl(),
            verification_url: default_verification_url(),
        }
    }
}

fn default_token_ttl() -> i64 {
    86_400
}

fn default_verification_code_ttl() -> i64 {
    86_400
}

fn default_verification_url() -> String {
    "http://localhost:8080/api/users/email-verification".to_string()
}
