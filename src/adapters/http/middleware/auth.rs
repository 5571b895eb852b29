//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects user into extensions
//! - `admin_only` - Layer that lets only admin users through
//! - `RequireAuth` - Extractor for handlers behind `auth_middleware`
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, keeping it agnostic of
//! how tokens are signed.
//!
//! ```text
//! Request → auth_middleware → admin_only → Handler (RequireAuth)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::post};
//!
//! let create = post(create_product)
//!     .route_layer(middleware::from_fn(admin_only))
//!     .route_layer(middleware::from_fn_with_state(validator, auth_middleware));
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// The header must be exactly `Bearer <token>`: one space, two parts.
///
/// | Failure | Status |
/// |---------|--------|
/// | header missing or empty | 401 |
/// | wrong scheme or shape | 401 |
/// | bad signature or malformed token | 401 |
/// | expired token, non-numeric subject | 403 |
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Ok(token) => token.to_owned(),
        Err(e) => return ApiError::from(e).into_response(),
    };

    match validator.validate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            ApiError::from(e).into_response()
        }
    }
}

/// Lets the request through only when the authenticated user is an admin.
///
/// Must run after `auth_middleware`.
pub async fn admin_only(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(user) => {
            tracing::warn!(user_id = %user.id, role = %user.role, "Admin route denied");
            ApiError::from(AuthError::InsufficientPermissions).into_response()
        }
        None => ApiError::from(AuthError::InsufficientPermissions).into_response(),
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?
        .to_str()
        .map_err(|_| AuthError::MalformedCredentials)?;
    if value.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok(token),
        _ => Err(AuthError::MalformedCredentials),
    }
}

/// Extractor that requires authentication.
///
/// Reads the user injected by `auth_middleware`; responds 401 if the
/// handler is mounted without it.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| ApiError::from(AuthError::MissingCredentials))
    }
}
