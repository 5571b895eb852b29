//! HTTP adapter for user accounts.
//!
//! - `POST /api/users/register` - Create an unverified account
//! - `POST /api/users/login` - Exchange credentials for an access token
//! - `GET /api/users/email-verification/:code` - Consume a verification code

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UserAppState;
pub use routes::user_routes;
