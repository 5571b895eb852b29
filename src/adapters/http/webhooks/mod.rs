//! HTTP adapter for payment gateway callbacks.
//!
//! - `POST /api/webhooks/xendit` - Invoice status callback

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::WebhookAppState;
pub use routes::webhook_routes;
