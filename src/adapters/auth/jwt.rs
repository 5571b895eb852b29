//! HS256 JWT adapter.
//!
//! Implements both sides of bearer authentication with one shared secret:
//! `TokenIssuer` for login and `SessionValidator` for the auth middleware.
//!
//! Claims: `sub` (numeric user id as a string), `role`, `iat`, `exp`.
//! Expiry is checked with zero leeway so an expired token is reported as
//! `TokenExpired` as soon as `exp` passes.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::user::User;
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer};

/// Claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and validates HS256 access tokens.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            ttl,
        }
    }

    /// Signs arbitrary claims with this service's key.
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign access token: {}", e);
            AuthError::SigningFailed(e.to_string())
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: &User) -> Result<IssuedToken, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = AccessClaims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        Ok(IssuedToken {
            token: self.sign(&claims)?,
            expires_at,
        })
    }
}

#[async_trait]
impl SessionValidator for JwtTokenService {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &Self::validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        let claims = data.claims;
        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidSubject
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.role))
    }
}

impl std::fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::NewUser;

    fn service() -> JwtTokenService {
        JwtTokenService::new(
            &SecretString::new("test-secret-with-enough-length-0123".to_string()),
            Duration::hours(1),
        )
    }

    fn user(role: &str) -> User {
        NewUser {
            full_name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            verification_code: "c".to_string(),
            verification_expires_at: Utc::now(),
        }
        .into_user(UserId::new(42), Utc::now())
    }

    fn claims(sub: &str, exp_offset: Duration) -> AccessClaims {
        let now = Utc::now();
        AccessClaims {
            sub: sub.to_string(),
            role: "customer".to_string(),
            iat: now.timestamp(),
            exp: (now + exp_offset).timestamp(),
        }
    }

    #[tokio::test]
    async fn issued_token_validates_to_same_identity() {
        let service = service();
        let issued = service.issue(&user("admin")).unwrap();

        let authenticated = service.validate(&issued.token).await.unwrap();

        assert_eq!(authenticated.id, UserId::new(42));
        assert!(authenticated.is_admin());
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let service = service();
        let token = service.sign(&claims("42", Duration::hours(-1))).unwrap();

        assert_eq!(service.validate(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn non_numeric_subject_is_rejected() {
        let service = service();
        let token = service.sign(&claims("user-abc", Duration::hours(1))).unwrap();

        assert_eq!(service.validate(&token).await, Err(AuthError::InvalidSubject));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenService::new(
            &SecretString::new("another-secret-that-is-long-enough".to_string()),
            Duration::hours(1),
        );
        let token = other.issue(&user("admin")).unwrap().token;

        assert_eq!(service().validate(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(service().validate("not-a-jwt").await, Err(AuthError::InvalidToken));
    }
}
