//! The realtime channel manager.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use shopfront_core::config::RealtimeConfig;
use shopfront_core::types::StoreId;

use crate::message::{ClientMessage, ServerMessage};
use crate::sink::EventSink;

/// Result of a successful (or reused) room join.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomJoin {
    /// The room that was joined.
    pub store_id: StoreId,
    /// Whether an already-open transport was reused.
    pub reused: bool,
}

#[derive(Debug)]
struct ActiveConnection {
    store_id: StoreId,
    outbound: mpsc::Sender<ClientMessage>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

/// Owns the single realtime transport for the process.
///
/// At most one connection is live at a time. `connect` is idempotent:
/// calling it while connected re-emits the room join instead of opening
/// a second transport. `disconnect` is the only cancellation primitive
/// and immediately stops event delivery from the torn-down transport.
///
/// Handshake and emit failures are logged and never propagate; screens
/// relying on realtime updates fall back to manual refresh.
#[derive(Debug)]
pub struct RealtimeChannel {
    config: RealtimeConfig,
    sink: Arc<dyn EventSink>,
    active: Mutex<Option<ActiveConnection>>,
}

impl RealtimeChannel {
    /// Create a disconnected channel.
    pub fn new(config: RealtimeConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            sink,
            active: Mutex::new(None),
        }
    }

    /// Open the transport (or reuse it) and join the store's room.
    ///
    /// Returns `None` when the store id is empty or when the handshake
    /// fails; a degraded channel must never crash the caller.
    pub async fn connect(&self, store_id: &StoreId) -> Option<RoomJoin> {
        if store_id.is_empty() {
            warn!("connect called without a store id, ignoring");
            return None;
        }

        let mut active = self.active.lock().await;

        if let Some(conn) = active.as_ref() {
            if !conn.reader.is_finished() {
                let join = ClientMessage::JoinStore {
                    store_id: store_id.clone(),
                };
                if conn.outbound.send(join).await.is_err() {
                    warn!(%store_id, "Failed to re-emit room join on open transport");
                } else {
                    debug!(%store_id, "Re-emitted room join on open transport");
                }
                return Some(RoomJoin {
                    store_id: store_id.clone(),
                    reused: true,
                });
            }
            // The previous transport died; replace it.
            *active = None;
        }

        let (stream, _response) = match connect_async(self.config.url.as_str()).await {
            Ok(ok) => ok,
            Err(e) => {
                warn!(url = %self.config.url, error = %e, "Realtime handshake failed");
                return None;
            }
        };
        info!(url = %self.config.url, %store_id, "Realtime channel connected");

        let (mut write, mut read) = stream.split();
        let (tx, mut rx) = mpsc::channel::<ClientMessage>(self.config.channel_buffer_size);

        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!(error = %e, "Failed to serialize outbound realtime message");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(json.into())).await {
                    warn!(error = %e, "Failed to send realtime message");
                    break;
                }
            }
        });

        let sink = Arc::clone(&self.sink);
        let room = store_id.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        dispatch(&sink, &room, text.as_str()).await;
                    }
                    Ok(Message::Close(_)) => {
                        info!(store_id = %room, "Realtime transport closed by server");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(store_id = %room, error = %e, "Realtime transport error");
                        break;
                    }
                }
            }
            info!(store_id = %room, "Realtime channel disconnected");
        });

        let join = ClientMessage::JoinStore {
            store_id: store_id.clone(),
        };
        if tx.send(join).await.is_err() {
            warn!(%store_id, "Failed to emit room join");
        }

        *active = Some(ActiveConnection {
            store_id: store_id.clone(),
            outbound: tx,
            reader,
            writer,
        });

        Some(RoomJoin {
            store_id: store_id.clone(),
            reused: false,
        })
    }

    /// Tear down the transport unconditionally. Idempotent.
    pub async fn disconnect(&self) {
        let mut active = self.active.lock().await;
        if let Some(conn) = active.take() {
            conn.reader.abort();
            conn.writer.abort();
            info!(store_id = %conn.store_id, "Realtime channel torn down");
        }
    }

    /// Whether a transport is currently live.
    pub async fn is_connected(&self) -> bool {
        let active = self.active.lock().await;
        matches!(active.as_ref(), Some(conn) if !conn.reader.is_finished())
    }

    /// The currently joined room, if any.
    pub async fn joined_store(&self) -> Option<StoreId> {
        let active = self.active.lock().await;
        active.as_ref().map(|conn| conn.store_id.clone())
    }
}

/// Parse and route one inbound frame. Unknown events are ignored.
async fn dispatch(sink: &Arc<dyn EventSink>, store_id: &StoreId, raw: &str) {
    match serde_json::from_str::<ServerMessage>(raw) {
        Ok(ServerMessage::OrderCreated(event)) => {
            debug!(order_id = %event.id, "Received order-created event");
            sink.on_order_created(store_id, &event).await;
        }
        Err(e) => {
            debug!(error = %e, "Ignoring unrecognized realtime frame");
        }
    }
}
