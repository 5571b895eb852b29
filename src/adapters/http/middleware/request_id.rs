//! Request ID middleware for request tracing and correlation.
//!
//! An `x-request-id` supplied by an upstream proxy is kept; otherwise a UUID
//! v4 is generated. The id is written back onto the request headers, so inner
//! layers and the error envelope see the same value, and echoed on the
//! response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Ensures every request and response carries a request id.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request_id_of(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    let header = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;

    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// The request id header of `request`, if present and non-empty.
pub fn request_id_of<B>(request: &axum::http::Request<B>) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
}
