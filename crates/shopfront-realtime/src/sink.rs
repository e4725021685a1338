//! Domain event fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use shopfront_cache::InvalidationBridge;
use shopfront_core::events::OrderCreatedEvent;
use shopfront_core::traits::notifier::{LocalNotification, LocalNotifier};
use shopfront_core::types::money::format_centavos;
use shopfront_core::types::{NotificationData, StoreId};

/// Receives parsed domain events from the realtime channel.
#[async_trait]
pub trait EventSink: Send + Sync + std::fmt::Debug + 'static {
    /// Called for every inbound order-created event.
    async fn on_order_created(&self, store_id: &StoreId, event: &OrderCreatedEvent);
}

/// Production event sink: cache invalidation plus local notification.
///
/// The two actions are independent and best-effort; neither gates the
/// other, and neither failure reaches the transport.
#[derive(Debug)]
pub struct OrderEventSink {
    bridge: Arc<InvalidationBridge>,
    notifier: Arc<dyn LocalNotifier>,
}

impl OrderEventSink {
    /// Create a sink over the invalidation bridge and local notifier.
    pub fn new(bridge: Arc<InvalidationBridge>, notifier: Arc<dyn LocalNotifier>) -> Self {
        Self { bridge, notifier }
    }
}

#[async_trait]
impl EventSink for OrderEventSink {
    async fn on_order_created(&self, store_id: &StoreId, event: &OrderCreatedEvent) {
        self.bridge.on_event(store_id, event.kind()).await;

        if !self.notifier.permission_granted().await {
            debug!("Notification permission not granted, skipping local notification");
            return;
        }

        let request = LocalNotification {
            title: "New sale!".to_string(),
            body: format!(
                "Order #{} received: {}",
                event.order_number,
                format_centavos(event.total)
            ),
            data: Some(NotificationData {
                order_id: event.id.clone(),
                order_number: event.order_number.clone(),
                total: event.total,
            }),
        };

        if let Err(e) = self.notifier.schedule(request).await {
            warn!(error = %e, "Failed to schedule local notification");
        }
    }
}
