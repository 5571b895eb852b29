//! Error middleware: every non-2xx response leaves as the JSON envelope.
//!
//! Three cases reach this layer:
//!
//! - responses rendered from `ApiError` carry their `ErrorResponse` as an
//!   extension and are re-rendered with the request id attached
//! - other JSON error bodies written by a handler are passed through
//! - plain-text or empty error bodies from the framework (unmatched route,
//!   wrong method, extractor rejections) are wrapped into the envelope
//!
//! Each error is logged with method, path, status and request id.

use std::any::Any;

use axum::{
    extract::Request,
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::request_id::request_id_of;
use crate::adapters::http::error::{error_code_for, ApiError, ErrorResponse};

/// Framework error bodies are short; anything longer is not a message.
const MAX_ERROR_BODY_BYTES: usize = 4 * 1024;

/// Renders error responses as the uniform envelope and logs them.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let request_id = request_id_of(&request);

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let envelope = if let Some(body) = response.extensions().get::<ErrorResponse>().cloned() {
        body
    } else if is_json(response.headers()) {
        log_error(status, &method, &path, request_id.as_deref(), "handler error");
        return response;
    } else {
        let (parts, body) = response.into_parts();
        let text = match axum::body::to_bytes(body, MAX_ERROR_BODY_BYTES).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Err(_) => String::new(),
        };
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            text
        };
        let envelope = ErrorResponse::new(error_code_for(status), message);
        log_error(status, &method, &path, request_id.as_deref(), &envelope.message);
        return render(status, &parts.headers, envelope.with_request_id(request_id));
    };

    log_error(status, &method, &path, request_id.as_deref(), &envelope.message);
    let (parts, _) = response.into_parts();
    render(status, &parts.headers, envelope.with_request_id(request_id))
}

/// Response for a handler that panicked.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::upstream("Internal server error").into_response()
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

fn render(status: StatusCode, original: &HeaderMap, envelope: ErrorResponse) -> Response {
    let mut response = (status, Json(envelope)).into_response();
    for (name, value) in original {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            response.headers_mut().insert(name.clone(), value.clone());
        }
    }
    response
}

fn log_error(
    status: StatusCode,
    method: &axum::http::Method,
    path: &str,
    request_id: Option<&str>,
    message: &str,
) {
    let request_id = request_id.unwrap_or("-");
    if status.is_server_error() {
        tracing::error!(%method, path, status = status.as_u16(), request_id, error = message, "Request failed");
    } else {
        tracing::warn!(%method, path, status = status.as_u16(), request_id, error = message, "Request rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::middleware::request_id::{request_id_middleware, REQUEST_ID_HEADER};
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn ok() -> &'static str {
        "fine"
    }

    async fn not_found() -> ApiError {
        ApiError::not_found("product not found")
    }

    async fn raw_json_conflict() -> (StatusCode, Json<serde_json::Value>) {
        (StatusCode::CONFLICT, Json(serde_json::json!({ "custom": true })))
    }

    async fn boom() -> &'static str {
        panic!("kaboom")
    }

    fn app() -> Router {
        Router::new()
            .route("/ok", get(ok))
            .route("/missing", get(not_found))
            .route("/conflict", get(raw_json_conflict))
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(middleware::from_fn(error_envelope))
            .layer(middleware::from_fn(request_id_middleware))
    }

    async fn send(method: &str, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = app()
            .oneshot(
                axum::http::Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(REQUEST_ID_HEADER, "req-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn success_passes_through() {
        let (status, _, body) = send("GET", "/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"fine");
    }

    #[tokio::test]
    async fn api_error_gets_request_id() {
        let (status, _, body) = send("GET", "/missing").await;
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "product not found");
        assert_eq!(body.request_id.as_deref(), Some("req-7"));
    }

    #[tokio::test]
    async fn unmatched_route_is_wrapped() {
        let (status, headers, body) = send("GET", "/nowhere").await;
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert!(!body.success);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "Not Found");
        assert_eq!(body.request_id.as_deref(), Some("req-7"));
    }

    #[tokio::test]
    async fn wrong_method_is_wrapped_and_keeps_allow_header() {
        let (status, headers, body) = send("DELETE", "/ok").await;
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body.error, "METHOD_NOT_ALLOWED");
        assert!(headers.contains_key(header::ALLOW));
    }

    #[tokio::test]
    async fn handler_json_error_is_left_alone() {
        let (status, _, body) = send("GET", "/conflict").await;
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, serde_json::json!({ "custom": true }));
    }

    #[tokio::test]
    async fn panic_becomes_internal_error() {
        let (status, _, body) = send("GET", "/boom").await;
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert_eq!(body.message, "Internal server error");
        assert_eq!(body.request_id.as_deref(), Some("req-7"));
    }
}
