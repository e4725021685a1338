//! Wire messages exchanged over the realtime channel.

use serde::{Deserialize, Serialize};

use shopfront_core::events::OrderCreatedEvent;
use shopfront_core::types::StoreId;

/// Messages the client emits to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join the per-store room; emitted after every successful handshake
    /// and re-emitted on redundant connect calls.
    JoinStore {
        /// The room identifier.
        #[serde(rename = "storeId")]
        store_id: StoreId,
    },
}

/// Messages the backend pushes to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    /// A new order was created for the joined store.
    #[serde(rename = "order:created")]
    OrderCreated(OrderCreatedEvent),
}
