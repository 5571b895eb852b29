//! Axum router configuration for user endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{login, register, verify_email, UserAppState};

/// Create the user API router, mounted at `/api/users`.
///
/// # Routes
/// - `POST /register` - Create an unverified account
/// - `POST /login` - Issue an access token
/// - `GET /email-verification/:code` - Verify an email address
pub fn user_routes() -> Router<UserAppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/email-verification/:code", get(verify_email))
}
