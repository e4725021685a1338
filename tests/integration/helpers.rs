//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use shopfront_cache::{InvalidationBridge, MemoryQueryCache};
use shopfront_core::config::{CacheConfig, RealtimeConfig};
use shopfront_core::result::AppResult;
use shopfront_core::traits::api::{BackendApi, PushTokenRegistration, TokenValidation};
use shopfront_core::traits::cache::QueryCache;
use shopfront_core::traits::notifier::LocalNotifier;
use shopfront_core::traits::storage::DeviceStorage;
use shopfront_core::types::{Profile, StoreId};
use shopfront_notify::{InProcessNotifier, InboxDeliveryListener, NotificationInbox};
use shopfront_realtime::{OrderEventSink, RealtimeChannel};
use shopfront_storage::TokenStore;
use shopfront_storage::providers::MemoryStorageProvider;

/// A fully wired client stack over in-memory providers.
pub struct TestStack {
    pub tokens: Arc<TokenStore>,
    pub inbox: Arc<NotificationInbox>,
    pub cache: Arc<MemoryQueryCache>,
    pub notifier: Arc<InProcessNotifier>,
    pub realtime: Arc<RealtimeChannel>,
}

impl TestStack {
    /// Build a stack whose realtime channel dials the given URL.
    pub async fn new(realtime_url: &str) -> Self {
        let storage: Arc<dyn DeviceStorage> = Arc::new(MemoryStorageProvider::new());
        let tokens = Arc::new(TokenStore::new(Arc::clone(&storage)));

        let inbox = Arc::new(NotificationInbox::new(Arc::clone(&storage)));
        inbox.load().await;

        let notifier = Arc::new(InProcessNotifier::new(true));
        notifier
            .add_listener(Arc::new(InboxDeliveryListener::new(Arc::clone(&inbox))))
            .await;

        let cache = Arc::new(MemoryQueryCache::new(&CacheConfig::default()));
        let bridge = Arc::new(InvalidationBridge::new(
            Arc::clone(&cache) as Arc<dyn QueryCache>
        ));

        let sink = Arc::new(OrderEventSink::new(
            bridge,
            Arc::clone(&notifier) as Arc<dyn LocalNotifier>,
        ));
        let realtime = Arc::new(RealtimeChannel::new(
            RealtimeConfig {
                url: realtime_url.to_string(),
                channel_buffer_size: 16,
            },
            sink,
        ));

        Self {
            tokens,
            inbox,
            cache,
            notifier,
            realtime,
        }
    }
}

/// A sample profile for the test store.
///
/// The timestamp is fixed so profiles constructed in separate calls
/// compare equal.
pub fn profile() -> Profile {
    Profile {
        id: StoreId::new("store-1"),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        plan: "pro".to_string(),
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
    }
}

/// Scripted backend API: one canned validation response plus recorded
/// push-token registrations.
#[derive(Debug)]
pub struct FakeBackend {
    validation: Mutex<Option<AppResult<TokenValidation>>>,
    pub registrations: Mutex<Vec<PushTokenRegistration>>,
}

impl FakeBackend {
    pub fn returning(validation: AppResult<TokenValidation>) -> Arc<Self> {
        Arc::new(Self {
            validation: Mutex::new(Some(validation)),
            registrations: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    async fn validate_token(&self) -> AppResult<TokenValidation> {
        self.validation
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(shopfront_core::AppError::network("no scripted response")))
    }

    async fn register_push_token(&self, registration: &PushTokenRegistration) -> AppResult<()> {
        self.registrations.lock().unwrap().push(registration.clone());
        Ok(())
    }
}

/// Loopback WebSocket server standing in for the backend realtime
/// endpoint. Records inbound text frames and can push frames to every
/// connected client.
pub struct WsServer {
    pub url: String,
    pub received: Arc<Mutex<Vec<String>>>,
    pub connection_count: Arc<AtomicUsize>,
    senders: Arc<Mutex<Vec<mpsc::UnboundedSender<String>>>>,
}

impl WsServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let received = Arc::new(Mutex::new(Vec::new()));
        let connection_count = Arc::new(AtomicUsize::new(0));
        let senders: Arc<Mutex<Vec<mpsc::UnboundedSender<String>>>> =
            Arc::new(Mutex::new(Vec::new()));

        {
            let received = Arc::clone(&received);
            let connection_count = Arc::clone(&connection_count);
            let senders = Arc::clone(&senders);
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    connection_count.fetch_add(1, Ordering::SeqCst);
                    let ws = match accept_async(stream).await {
                        Ok(ws) => ws,
                        Err(_) => continue,
                    };
                    let (mut write, mut read) = ws.split();

                    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
                    senders.lock().unwrap().push(tx);
                    tokio::spawn(async move {
                        while let Some(text) = rx.recv().await {
                            if write.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                    });

                    let received = Arc::clone(&received);
                    tokio::spawn(async move {
                        while let Some(Ok(frame)) = read.next().await {
                            if let Message::Text(text) = frame {
                                received.lock().unwrap().push(text.to_string());
                            }
                        }
                    });
                }
            });
        }

        Self {
            url: format!("ws://{addr}"),
            received,
            connection_count,
            senders,
        }
    }

    /// Push a raw text frame to every connected client.
    pub fn push(&self, text: &str) {
        for tx in self.senders.lock().unwrap().iter() {
            let _ = tx.send(text.to_string());
        }
    }

    /// Inbound frames received so far.
    pub fn frames(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

/// Poll a condition until it holds, failing after two seconds.
macro_rules! eventually {
    ($cond:expr) => {{
        let mut met = false;
        for _ in 0..200 {
            if $cond {
                met = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(met, "condition not met within 2s: {}", stringify!($cond));
    }};
}
pub(crate) use eventually;
