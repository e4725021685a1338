//! HTTP client tests against an in-process mock backend.

use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use shopfront_api::{HttpBackend, SessionSignal};
use shopfront_core::config::ApiConfig;
use shopfront_core::error::ErrorKind;
use shopfront_core::traits::api::{BackendApi, PushTokenRegistration};
use shopfront_storage::TokenStore;
use shopfront_storage::providers::MemoryStorageProvider;

use crate::helpers::profile;

#[derive(Clone, Default)]
struct MockState {
    push_bodies: Arc<Mutex<Vec<Value>>>,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn validate(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer(&headers) {
        Some("good-token") => (
            StatusCode::OK,
            Json(json!({
                "valid": true,
                "user": {
                    "id": "store-1",
                    "name": "Ana",
                    "email": "ana@example.com",
                    "plan": "pro",
                    "createdAt": "2024-01-01T00:00:00Z"
                }
            })),
        ),
        Some(_) | None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        ),
    }
}

async fn register_push(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    if bearer(&headers) != Some("good-token") {
        return StatusCode::FORBIDDEN;
    }
    state.push_bodies.lock().unwrap().push(body);
    StatusCode::NO_CONTENT
}

/// Serve the mock backend on an ephemeral port and return its base URL.
async fn start_mock() -> (String, MockState) {
    let state = MockState::default();
    let app = axum::Router::new()
        .route("/auth/validate", get(validate))
        .route("/devices/push-token", post(register_push))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn backend_with_token(base_url: &str, token: Option<&str>) -> (HttpBackend, Arc<TokenStore>) {
    let tokens = Arc::new(TokenStore::new(Arc::new(MemoryStorageProvider::new())));
    if let Some(token) = token {
        tokens.save_credential(token, &profile()).await;
    }
    let config = ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    };
    let backend = HttpBackend::new(&config, Arc::clone(&tokens)).unwrap();
    (backend, tokens)
}

#[tokio::test]
async fn test_validate_token_round_trip() {
    let (base_url, _state) = start_mock().await;
    let (backend, _tokens) = backend_with_token(&base_url, Some("good-token")).await;

    let validation = backend.validate_token().await.unwrap();
    assert!(validation.valid);
    let user = validation.user.unwrap();
    assert_eq!(user.id.as_str(), "store-1");
    assert_eq!(user.email, "ana@example.com");
}

#[tokio::test]
async fn test_rejected_token_ends_session() {
    let (base_url, _state) = start_mock().await;
    let (backend, tokens) = backend_with_token(&base_url, Some("stale-token")).await;

    let mut signals = backend.session_signals();
    assert_eq!(*signals.borrow_and_update(), SessionSignal::Active);

    let err = backend.validate_token().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);

    // The credential is gone and the expiry signal was broadcast.
    assert_eq!(tokens.credential().await, None);
    signals.changed().await.unwrap();
    assert_eq!(*signals.borrow(), SessionSignal::Expired);
}

#[tokio::test]
async fn test_forbidden_push_registration_ends_session() {
    let (base_url, state) = start_mock().await;
    let (backend, tokens) = backend_with_token(&base_url, Some("stale-token")).await;

    let registration = PushTokenRegistration {
        token: "push-1".to_string(),
        provider: "fcm".to_string(),
        store_id: "store-1".to_string(),
        device_id: "dev-1".to_string(),
        device_name: "test-device".to_string(),
    };
    let err = backend.register_push_token(&registration).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(tokens.credential().await, None);
    assert!(state.push_bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_push_registration_payload_shape() {
    let (base_url, state) = start_mock().await;
    let (backend, _tokens) = backend_with_token(&base_url, Some("good-token")).await;

    let registration = PushTokenRegistration {
        token: "push-1".to_string(),
        provider: "fcm".to_string(),
        store_id: "store-1".to_string(),
        device_id: "dev-1".to_string(),
        device_name: "test-device".to_string(),
    };
    backend.register_push_token(&registration).await.unwrap();

    let bodies = state.push_bodies.lock().unwrap();
    assert_eq!(
        bodies[0],
        json!({
            "token": "push-1",
            "provider": "fcm",
            "storeId": "store-1",
            "deviceId": "dev-1",
            "deviceName": "test-device"
        })
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    // Nothing listens here.
    let (backend, tokens) = backend_with_token("http://127.0.0.1:9", Some("good-token")).await;

    let err = backend.validate_token().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    // Network failures do not clear the credential.
    assert_eq!(tokens.credential().await, Some("good-token".to_string()));
}
