//! HTTP handler for payment gateway callbacks.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::timeout::bounded;
use crate::domain::payment::CallbackTokenVerifier;
use crate::ports::PaymentsService;

use super::dto::{WebhookAck, WebhookRequest, CALLBACK_TOKEN_HEADER};

/// State shared by the webhook handler.
#[derive(Clone)]
pub struct WebhookAppState {
    pub payments_service: Arc<dyn PaymentsService>,
    pub verifier: Arc<CallbackTokenVerifier>,
    /// Deadline for each service call.
    pub timeout: Duration,
}

/// POST /api/webhooks/xendit
///
/// The token is checked before the body is parsed, so an unauthenticated
/// caller learns nothing about payload handling.
pub async fn handle_xendit_callback(
    State(state): State<WebhookAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let token = headers
        .get(CALLBACK_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.verifier.verify(token) {
        tracing::warn!("Webhook rejected: invalid callback token");
        return Err(ApiError::unauthorized("Invalid callback token"));
    }

    let request: WebhookRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Webhook payload could not be parsed");
        ApiError::validation("Invalid request")
    })?;

    let external_id = request.external_id.clone();
    bounded(
        state.timeout,
        state.payments_service.receive_payment_webhook(request.into()),
    )
    .await
    .map_err(|e| {
        tracing::error!(external_id = %external_id, error = %e, "Webhook processing failed");
        ApiError::upstream("failed to process webhook")
    })?;

    Ok(Json(WebhookAck {
        success: true,
        message: "Webhook processed".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::http::webhooks::routes::webhook_routes;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::application::PaymentProcessor;
    use crate::domain::payment::{PaymentError, PaymentNotification, PaymentStatus};
    use crate::ports::PaymentRepository;

    struct BrokenPayments;

    #[async_trait::async_trait]
    impl PaymentsService for BrokenPayments {
        async fn receive_payment_webhook(
            &self,
            _notification: PaymentNotification,
        ) -> Result<(), PaymentError> {
            Err(PaymentError::Infrastructure(
                "[DATABASE_ERROR] Failed to update payment: connection refused (db.internal:5432)"
                    .to_string(),
            ))
        }
    }

    fn setup() -> (Arc<InMemoryPaymentRepository>, axum::Router) {
        let repo = Arc::new(InMemoryPaymentRepository::new().with_pending("order-1", 50_000));
        let router = webhook_routes().with_state(WebhookAppState {
            payments_service: Arc::new(PaymentProcessor::new(repo.clone())),
            verifier: Arc::new(CallbackTokenVerifier::new(SecretString::new(
                "cb-secret".to_string(),
            ))),
            timeout: Duration::from_secs(1),
        });
        (repo, router)
    }

    fn callback(status: &str, amount: i64) -> String {
        json!({
            "id": "inv-1",
            "external_id": "order-1",
            "status": status,
            "amount": amount,
            "payment_method": "BANK_TRANSFER",
            "payment_channel": "BCA",
            "metadata": { "purpose": "order" }
        })
        .to_string()
    }

    async fn send(router: axum::Router, token: Option<&str>, body: String) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/xendit")
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(CALLBACK_TOKEN_HEADER, token);
        }
        let response = router
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn valid_callback_updates_payment() {
        let (repo, router) = setup();

        let (status, body) = send(router, Some("cb-secret"), callback("PAID", 50_000)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true, "message": "Webhook processed" }));
        let payment = repo.find_by_external_id("order-1").await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn wrong_token_is_401_even_for_garbage_body() {
        let (repo, router) = setup();

        let (status, body) = send(router.clone(), Some("guess"), "not json".to_string()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid callback token");

        let (status, _) = send(router, None, callback("PAID", 50_000)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let payment = repo.find_by_external_id("order-1").await.unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn unparsable_body_is_400() {
        let (_, router) = setup();
        let (status, body) = send(router, Some("cb-secret"), "{\"amount\": \"lots\"}".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request");
    }

    #[tokio::test]
    async fn service_failure_is_500() {
        let (_, router) = setup();
        let (status, _) = send(router, Some("cb-secret"), callback("PAID", 1)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn infrastructure_detail_stays_out_of_the_response() {
        let router = webhook_routes().with_state(WebhookAppState {
            payments_service: Arc::new(BrokenPayments),
            verifier: Arc::new(CallbackTokenVerifier::new(SecretString::new(
                "cb-secret".to_string(),
            ))),
            timeout: Duration::from_secs(1),
        });

        let (status, body) = send(router, Some("cb-secret"), callback("PAID", 50_000)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "failed to process webhook");
        assert!(!body.to_string().contains("db.internal"));
    }

    #[tokio::test]
    async fn redelivery_is_acknowledged() {
        let (_, router) = setup();
        let (first, _) = send(router.clone(), Some("cb-secret"), callback("PAID", 50_000)).await;
        let (second, _) = send(router, Some("cb-secret"), callback("PAID", 50_000)).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);
    }
}
