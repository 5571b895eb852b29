//! Top-level router: every route under `/api` plus `/health`.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Request ID - assigns `x-request-id`
//! 2. `TraceLayer` - one span per request
//! 3. Error envelope - uniform JSON errors, logged
//! 4. Panic catcher - panics become 500 envelopes
//!
//! Auth and admin checks are attached per route by the product router.

use axum::{
    http::{header, HeaderValue, Method, Request},
    middleware,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::{
    error_envelope, handle_panic, request_id_middleware, AuthState, REQUEST_ID_HEADER,
};
use super::products::{product_routes, ProductAppState};
use super::users::{user_routes, UserAppState};
use super::webhooks::{webhook_routes, WebhookAppState};

/// Everything the API needs, built once at startup.
#[derive(Clone)]
pub struct ApiState {
    pub users: UserAppState,
    pub products: ProductAppState,
    pub webhooks: WebhookAppState,
    pub auth: AuthState,
}

/// Builds the full application router.
pub fn api_router(state: ApiState) -> Router {
    let api = Router::new()
        .nest("/users", user_routes().with_state(state.users))
        .nest(
            "/products",
            product_routes(state.auth).with_state(state.products),
        )
        .nest("/webhooks", webhook_routes().with_state(state.webhooks));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(middleware::from_fn(error_envelope))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

/// CORS policy: the configured origins, or any origin when none are set.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]);

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if allowed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(allowed)
    }
}

/// One span per request. It runs before routing, so only the raw URI is
/// known here.
fn request_span<B>(req: &Request<B>) -> tracing::Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "http",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
