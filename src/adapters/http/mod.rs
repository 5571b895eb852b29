//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure;
//! `router` assembles them under `/api` with the shared middleware stack.

pub mod error;
pub mod middleware;
pub mod products;
pub mod router;
pub mod timeout;
pub mod users;
pub mod webhooks;

// Re-export key types for convenience
pub use error::{ApiError, ErrorResponse};
pub use products::ProductAppState;
pub use router::{api_router, cors_layer, ApiState};
pub use users::UserAppState;
pub use webhooks::WebhookAppState;
