//! Domain events pushed by the backend over the realtime channel.
//!
//! Events are consumed by the cache invalidation bridge and the local
//! notification path. The wire envelope lives in `shopfront-realtime`;
//! this module only defines the payloads and their kinds.

use serde::{Deserialize, Serialize};

use crate::types::id::OrderId;

/// Discriminant for every domain event kind the client understands.
///
/// The cache invalidation bridge maps kinds to cache-key sets, so adding
/// a new event means adding a variant here plus one mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainEventKind {
    /// A new order was created for the store.
    OrderCreated,
}

/// Payload of an order-created event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedEvent {
    /// Backend order identifier.
    pub id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// Order total in centavos.
    pub total: i64,
}

impl OrderCreatedEvent {
    /// The kind discriminant for this payload.
    pub fn kind(&self) -> DomainEventKind {
        DomainEventKind::OrderCreated
    }
}
