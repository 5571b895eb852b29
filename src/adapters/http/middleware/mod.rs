//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `request_id` - Assigns and echoes `x-request-id`
//! - `error_envelope` - Renders and logs every error response uniformly
//! - `auth` - Bearer authentication, admin guard and extractors
//!
//! # Middleware Order (outermost first)
//!
//! 1. Request ID
//! 2. `TraceLayer`
//! 3. Error envelope
//! 4. Panic catcher
//! 5. Per-route auth layers

pub mod auth;
pub mod error_envelope;
pub mod request_id;

pub use auth::{admin_only, auth_middleware, AuthState, RequireAuth};
pub use error_envelope::{error_envelope, handle_panic};
pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
