//! Uniform error envelope for every non-2xx response.
//!
//! Handlers and middleware return `ApiError`; its `IntoResponse` writes the
//! JSON envelope and tags the response with the `ErrorResponse` it rendered
//! so the error middleware can attach the request id without reparsing.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, ValidationError};

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable kind, e.g. `BAD_REQUEST`.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        if request_id.is_some() {
            self.request_id = request_id;
        }
        self
    }
}

/// Error kinds the HTTP layer can report.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400: malformed input or a rejected domain rule.
    Validation {
        message: String,
        field: Option<String>,
    },
    /// 401
    Unauthorized(String),
    /// 403
    Forbidden(String),
    /// 404
    NotFound(String),
    /// 500: a downstream service failed or timed out.
    Upstream(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        ApiError::Upstream(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::NotFound(message)
            | ApiError::Upstream(message) => message,
        }
    }

    /// Envelope for this error, without a request id.
    pub fn to_body(&self) -> ErrorResponse {
        let body = ErrorResponse::new(error_code_for(self.status()), self.message());
        match self {
            ApiError::Validation {
                field: Some(field), ..
            } => body.with_details(serde_json::json!({ "field": field })),
            _ => body,
        }
    }
}

/// Envelope `error` value for a status code.
pub fn error_code_for(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "REQUEST_FAILED",
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status().as_u16(), self.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.to_body();
        let mut response = (self.status(), Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation {
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::validation(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::SigningFailed(_) => ApiError::upstream("Internal server error"),
            err if err.is_forbidden() => ApiError::Forbidden(err.to_string()),
            err => ApiError::Unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn status_follows_kind() {
        assert_eq!(ApiError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::upstream("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn renders_envelope_and_marks_response() {
        let response = ApiError::not_found("product not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let marker = response.extensions().get::<ErrorResponse>().cloned().unwrap();
        let body = body_of(response).await;
        assert_eq!(body, marker);
        assert!(!body.success);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "product not found");
        assert_eq!(body.request_id, None);
    }

    #[tokio::test]
    async fn validation_error_carries_field_detail() {
        let err: ApiError = ValidationError::empty_field("unit").into();
        let body = body_of(err.into_response()).await;

        assert_eq!(body.error, "BAD_REQUEST");
        assert_eq!(body.message, "unit is required");
        assert_eq!(body.details, Some(serde_json::json!({ "field": "unit" })));
    }

    #[test]
    fn auth_errors_split_between_401_and_403() {
        assert_eq!(
            ApiError::from(AuthError::InvalidToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::MissingCredentials).message(),
            "Missing authorization header"
        );
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::InsufficientPermissions),
            ApiError::forbidden("Admin access required")
        );
        assert_eq!(
            ApiError::from(AuthError::SigningFailed("bad key".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn request_id_is_kept_when_absent_later() {
        let body = ErrorResponse::new("NOT_FOUND", "x")
            .with_request_id(Some("abc".to_string()))
            .with_request_id(None);
        assert_eq!(body.request_id.as_deref(), Some("abc"));
    }
}
