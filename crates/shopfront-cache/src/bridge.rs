//! Domain event → cache invalidation mapping.
//!
//! A static mapping from event kind to the set of query caches the event
//! is known to affect. Extending to a new event kind means adding a
//! mapping entry, not new control flow.

use std::sync::Arc;

use tracing::{debug, warn};

use shopfront_core::events::DomainEventKind;
use shopfront_core::traits::cache::QueryCache;
use shopfront_core::types::StoreId;

use crate::keys;

/// Marks the query caches affected by a domain event as stale.
#[derive(Debug)]
pub struct InvalidationBridge {
    cache: Arc<dyn QueryCache>,
}

impl InvalidationBridge {
    /// Create a bridge over a query cache.
    pub fn new(cache: Arc<dyn QueryCache>) -> Self {
        Self { cache }
    }

    /// The cache keys a given event kind invalidates for a store.
    pub fn keys_for(kind: DomainEventKind, store_id: &StoreId) -> Vec<String> {
        match kind {
            DomainEventKind::OrderCreated => vec![
                keys::sales_list(store_id),
                keys::sales_paged(store_id),
                keys::dashboard_metrics(store_id),
                keys::recent_sales(store_id),
            ],
        }
    }

    /// Mark every cache affected by the event as stale.
    ///
    /// Invalidations are unordered and best-effort; consumers must
    /// tolerate any interleaving of refetches.
    pub async fn on_event(&self, store_id: &StoreId, kind: DomainEventKind) {
        for key in Self::keys_for(kind, store_id) {
            if let Err(e) = self.cache.mark_stale(&key).await {
                warn!(key, error = %e, "Failed to mark cache stale");
            }
        }
        debug!(%store_id, ?kind, "Invalidated caches for event");
    }
}
