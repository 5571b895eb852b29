//! Axum router configuration for webhook endpoints.

use axum::{routing::post, Router};

use super::handlers::{handle_xendit_callback, WebhookAppState};

/// Create the webhook router, mounted at `/api/webhooks`.
///
/// Webhooks don't use bearer authentication; each callback carries the
/// shared callback token instead.
///
/// # Routes
/// - `POST /xendit` - Invoice status callback
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route("/xendit", post(handle_xendit_callback))
}
