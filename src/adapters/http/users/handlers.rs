//! HTTP handlers for user account endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::timeout::bounded;
use crate::domain::user::UserError;
use crate::ports::UserService;

use super::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// State shared by the user handlers.
#[derive(Clone)]
pub struct UserAppState {
    pub user_service: Arc<dyn UserService>,
    /// Deadline for each service call.
    pub timeout: Duration,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/users/register
pub async fn register(
    State(state): State<UserAppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let user = bounded(state.timeout, state.user_service.register(request.into()))
        .await
        .map_err(|e| match e {
            UserError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "Registration failed");
                ApiError::validation("registration failed")
            }
            other => ApiError::validation(other.message()),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. Please check your email to verify your account."
                .to_string(),
            user: user.into(),
        }),
    ))
}

/// POST /api/users/login
pub async fn login(
    State(state): State<UserAppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let (token, user) = bounded(state.timeout, state.user_service.login(request.into()))
        .await
        .map_err(|e| match e {
            UserError::Infrastructure(detail) => {
                tracing::error!(error = %detail, "Login failed");
                ApiError::unauthorized("login failed")
            }
            other => ApiError::unauthorized(other.message()),
        })?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: token.token,
        expires_at: token.expires_at,
        user: user.into(),
    }))
}

/// GET /api/users/email-verification/:code
pub async fn verify_email(
    State(state): State<UserAppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    bounded(state.timeout, state.user_service.verify_email(&code))
        .await
        .map_err(|e| match e {
            UserError::InvalidVerificationCode => ApiError::unauthorized(e.message()),
            other => {
                tracing::error!(error = %other, "Email verification failed");
                ApiError::upstream("failed to verify email")
            }
        })?;

    Ok(Json(MessageResponse::new("Successfully verified email")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    use crate::adapters::http::error::ErrorResponse;
    use crate::adapters::http::users::routes::user_routes;
    use crate::domain::foundation::{UserId, ValidationError};
    use crate::domain::user::{NewUser, User};
    use crate::ports::{IssuedToken, LoginUser, RegisterUser};

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    /// Scripted service: behaviour is picked by the email or code it receives.
    #[derive(Default)]
    struct ScriptedUserService {
        calls: AtomicUsize,
    }

    fn user(email: &str) -> User {
        NewUser {
            full_name: "Ana Green".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: "customer".to_string(),
            verification_code: "code".to_string(),
            verification_expires_at: Utc::now(),
        }
        .into_user(UserId::new(7), Utc::now())
    }

    #[async_trait]
    impl UserService for ScriptedUserService {
        async fn register(&self, request: RegisterUser) -> Result<User, UserError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match request.email.as_str() {
                "taken@example.com" => Err(UserError::EmailAlreadyRegistered(request.email)),
                "down@example.com" => Err(UserError::infrastructure("pool closed")),
                _ => Ok(user(&request.email)),
            }
        }

        async fn login(&self, request: LoginUser) -> Result<(IssuedToken, User), UserError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match request.email.as_str() {
                "ana@example.com" if request.password == "secret1" => Ok((
                    IssuedToken {
                        token: "jwt".to_string(),
                        expires_at: Utc::now(),
                    },
                    user(&request.email),
                )),
                "slow@example.com" => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Err(UserError::InvalidCredentials)
                }
                _ => Err(UserError::InvalidCredentials),
            }
        }

        async fn verify_email(&self, code: &str) -> Result<(), UserError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match code {
                "good" => Ok(()),
                "broken" => Err(UserError::infrastructure("pool closed")),
                _ => Err(UserError::InvalidVerificationCode),
            }
        }
    }

    fn setup() -> (Arc<ScriptedUserService>, axum::Router) {
        let service = Arc::new(ScriptedUserService::default());
        let router = user_routes().with_state(UserAppState {
            user_service: service.clone(),
            timeout: Duration::from_millis(200),
        });
        (service, router)
    }

    async fn send(
        router: axum::Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn registration(email: &str, password: &str) -> serde_json::Value {
        serde_json::json!({ "full_name": "Ana Green", "email": email, "password": password })
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Register
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn register_returns_201_with_summary() {
        let (_, router) = setup();
        let (status, body) = send(
            router,
            "POST",
            "/register",
            Some(registration("ana@example.com", "secret1")),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["message"],
            "Registration successful. Please check your email to verify your account."
        );
        assert_eq!(body["user"]["email"], "ana@example.com");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn short_password_never_reaches_service() {
        let (service, router) = setup();
        let (status, body) = send(
            router,
            "POST",
            "/register",
            Some(registration("ana@example.com", "12345")),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], ValidationError::too_short("password", 6).to_string());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn register_service_errors_are_400() {
        let (_, router) = setup();
        let (status, body) = send(
            router.clone(),
            "POST",
            "/register",
            Some(registration("taken@example.com", "secret1")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "email taken@example.com is already registered");

        let (status, body) = send(
            router,
            "POST",
            "/register",
            Some(registration("down@example.com", "secret1")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "registration failed");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let (service, router) = setup();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<ErrorResponse>().is_some());
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Login
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let (_, router) = setup();
        let (status, body) = send(
            router,
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "ana@example.com", "password": "secret1" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["token"], "jwt");
        assert_eq!(body["user"]["id"], 7);
    }

    #[tokio::test]
    async fn login_failures_are_401_and_bad_input_400() {
        let (_, router) = setup();
        let (status, body) = send(
            router.clone(),
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "ana@example.com", "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid email or password");

        let (status, _) = send(
            router,
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "not-an-email", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_login_times_out_as_401() {
        let (_, router) = setup();
        let (status, body) = send(
            router,
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "slow@example.com", "password": "secret1" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "login failed");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Email verification
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verification_status_mapping() {
        let (_, router) = setup();

        let (status, body) = send(router.clone(), "GET", "/email-verification/good", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully verified email");

        let (status, body) = send(router.clone(), "GET", "/email-verification/stale", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].as_str().unwrap().contains("invalid or expired"));

        let (status, _) = send(router, "GET", "/email-verification/broken", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
