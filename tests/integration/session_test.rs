//! Session lifecycle tests over a fully wired client stack.

use std::sync::Arc;

use tokio::sync::watch;

use shopfront_api::SessionSignal;
use shopfront_core::config::DeviceConfig;
use shopfront_core::traits::api::TokenValidation;
use shopfront_session::{SessionController, SessionState};
use shopfront_storage::identity::DeviceIdentity;

use crate::helpers::{FakeBackend, TestStack, WsServer, eventually, profile};

fn controller(stack: &TestStack, api: Arc<FakeBackend>) -> Arc<SessionController> {
    let device = DeviceIdentity {
        device_id: "dev-1".to_string(),
        device_name: "test-device".to_string(),
    };
    let device_config = DeviceConfig {
        push_token: Some("push-token-1".to_string()),
        ..DeviceConfig::default()
    };
    Arc::new(SessionController::new(
        Arc::clone(&stack.tokens),
        api,
        Arc::clone(&stack.realtime),
        device,
        device_config,
    ))
}

#[tokio::test]
async fn test_bootstrap_restores_session_and_joins_room() {
    let server = WsServer::start().await;
    let stack = TestStack::new(&server.url).await;
    stack.tokens.save_credential("tok-1", &profile()).await;

    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let controller = controller(&stack, api.clone());

    controller.bootstrap().await;
    assert_eq!(controller.current(), SessionState::Authenticated(profile()));
    assert!(stack.realtime.is_connected().await);

    // Push registration happens before the room join.
    assert_eq!(api.registrations.lock().unwrap().len(), 1);
    eventually!(!server.frames().is_empty());
    let frame: serde_json::Value = serde_json::from_str(&server.frames()[0]).unwrap();
    assert_eq!(frame["data"]["storeId"], "store-1");
}

#[tokio::test]
async fn test_sign_out_tears_down_realtime() {
    let server = WsServer::start().await;
    let stack = TestStack::new(&server.url).await;

    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let controller = controller(&stack, api);

    controller.sign_in("tok-1", profile()).await;
    assert!(stack.realtime.is_connected().await);

    controller.sign_out().await;
    assert_eq!(controller.current(), SessionState::Unauthenticated);
    assert!(!stack.realtime.is_connected().await);
    assert_eq!(stack.tokens.credential().await, None);
}

#[tokio::test]
async fn test_session_survives_unreachable_realtime() {
    let stack = TestStack::new("ws://127.0.0.1:9").await;

    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let controller = controller(&stack, api);

    controller.sign_in("tok-1", profile()).await;
    // Authenticated despite the dead transport.
    assert_eq!(controller.current(), SessionState::Authenticated(profile()));
    assert!(!stack.realtime.is_connected().await);
}

#[tokio::test]
async fn test_credential_survives_restart() {
    let server = WsServer::start().await;
    let stack = TestStack::new(&server.url).await;

    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let first = controller(&stack, api);
    first.sign_in("tok-1", profile()).await;
    stack.realtime.disconnect().await;

    // Second controller over the same storage: the persisted credential
    // and cached profile are still there for bootstrap to validate.
    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let second = controller(&stack, api);
    second.bootstrap().await;
    assert_eq!(second.current(), SessionState::Authenticated(profile()));
}

#[tokio::test]
async fn test_expiry_signal_ends_session() {
    let server = WsServer::start().await;
    let stack = TestStack::new(&server.url).await;

    let api = FakeBackend::returning(Ok(TokenValidation {
        valid: true,
        user: Some(profile()),
    }));
    let controller = controller(&stack, api);

    controller.sign_in("tok-1", profile()).await;
    assert!(stack.realtime.is_connected().await);

    let (signal_tx, signal_rx) = watch::channel(SessionSignal::Active);
    let watcher = controller.spawn_expiry_watcher(signal_rx);

    // The HTTP client observed a 401 and broadcast expiry.
    signal_tx.send(SessionSignal::Expired).unwrap();

    eventually!(controller.current() == SessionState::Unauthenticated);
    assert!(!stack.realtime.is_connected().await);
    watcher.abort();
}
