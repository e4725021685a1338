//! Shopfront Agent — headless storefront-management client.
//!
//! Main entry point that wires all crates together, restores a persisted
//! session, and keeps the realtime channel alive until shutdown.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use shopfront_api::HttpBackend;
use shopfront_cache::{InvalidationBridge, MemoryQueryCache};
use shopfront_core::config::ClientConfig;
use shopfront_core::error::AppError;
use shopfront_core::traits::storage::DeviceStorage;
use shopfront_notify::{InProcessNotifier, InboxDeliveryListener, NotificationInbox};
use shopfront_realtime::{OrderEventSink, RealtimeChannel};
use shopfront_session::SessionController;
use shopfront_storage::TokenStore;
use shopfront_storage::identity::device_identity;
use shopfront_storage::providers::{FileStorageProvider, MemoryStorageProvider};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Agent error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<ClientConfig, AppError> {
    let env = std::env::var("SHOPFRONT_ENV").unwrap_or_else(|_| "development".to_string());
    ClientConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &ClientConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => fmt().with_env_filter(filter).json().init(),
        _ => fmt().with_env_filter(filter).init(),
    }
}

async fn run(config: ClientConfig) -> Result<(), AppError> {
    // Device-local persistence.
    let storage: Arc<dyn DeviceStorage> = match config.storage.provider.as_str() {
        "memory" => Arc::new(MemoryStorageProvider::new()),
        _ => Arc::new(FileStorageProvider::new(&config.storage.data_dir).await?),
    };

    let tokens = Arc::new(TokenStore::new(storage));
    let device = device_identity(tokens.storage(), &config.device.device_name).await?;

    // Notification inbox, hydrated from persisted state.
    let inbox = Arc::new(NotificationInbox::new(Arc::clone(tokens.storage())));
    let restored = inbox.load().await;
    tracing::info!(
        count = restored.len(),
        unread = inbox.unread_count().await,
        "Notification inbox restored"
    );

    // Local notification dispatch feeds the inbox.
    let notifier = Arc::new(InProcessNotifier::new(config.device.notification_permission));
    notifier
        .add_listener(Arc::new(InboxDeliveryListener::new(Arc::clone(&inbox))))
        .await;

    // Query caches and the event invalidation bridge.
    let cache = Arc::new(MemoryQueryCache::new(&config.cache));
    let bridge = Arc::new(InvalidationBridge::new(cache));

    // Realtime channel with the production event sink.
    let sink = Arc::new(OrderEventSink::new(bridge, notifier));
    let realtime = Arc::new(RealtimeChannel::new(config.realtime.clone(), sink));

    // Authenticated backend client.
    let api = Arc::new(HttpBackend::new(&config.api, Arc::clone(&tokens))?);
    let session_signals = api.session_signals();

    let controller = Arc::new(SessionController::new(
        tokens,
        api,
        Arc::clone(&realtime),
        device,
        config.device.clone(),
    ));
    let expiry_watcher = controller.spawn_expiry_watcher(session_signals);

    controller.bootstrap().await;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown: {e}")))?;

    tracing::info!("Shutting down");
    expiry_watcher.abort();
    realtime.disconnect().await;
    Ok(())
}
