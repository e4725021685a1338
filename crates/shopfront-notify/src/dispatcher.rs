//! In-process local notification dispatch.
//!
//! On a device the OS displays scheduled notifications and hands
//! foreground deliveries back to the app. The headless client models
//! that loop in-process: [`InProcessNotifier`] forwards every scheduled
//! notification to its registered delivery listeners, and
//! [`InboxDeliveryListener`] files deliveries into the inbox through the
//! same `add` entry point the realtime path uses.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use shopfront_core::result::AppResult;
use shopfront_core::traits::notifier::{LocalNotification, LocalNotifier};
use shopfront_core::types::Notification;

use crate::inbox::NotificationInbox;

/// Receives notifications delivered while the client is foregrounded.
#[async_trait]
pub trait DeliveryListener: Send + Sync + std::fmt::Debug + 'static {
    /// Called for every delivered local notification.
    async fn on_delivered(&self, notification: LocalNotification);
}

/// Local notifier that dispatches to in-process listeners.
#[derive(Debug)]
pub struct InProcessNotifier {
    permission: AtomicBool,
    listeners: Mutex<Vec<Arc<dyn DeliveryListener>>>,
}

impl InProcessNotifier {
    /// Create a notifier with the given permission state.
    pub fn new(permission_granted: bool) -> Self {
        Self {
            permission: AtomicBool::new(permission_granted),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Register a delivery listener.
    pub async fn add_listener(&self, listener: Arc<dyn DeliveryListener>) {
        self.listeners.lock().await.push(listener);
    }

    /// Update the permission state (settings screen analogue).
    pub fn set_permission(&self, granted: bool) {
        self.permission.store(granted, Ordering::Relaxed);
    }
}

#[async_trait]
impl LocalNotifier for InProcessNotifier {
    async fn permission_granted(&self) -> bool {
        self.permission.load(Ordering::Relaxed)
    }

    async fn schedule(&self, request: LocalNotification) -> AppResult<()> {
        let listeners = self.listeners.lock().await.clone();
        debug!(title = %request.title, listeners = listeners.len(), "Scheduling local notification");
        for listener in listeners {
            listener.on_delivered(request.clone()).await;
        }
        Ok(())
    }
}

/// Delivery listener that files notifications into the inbox.
#[derive(Debug)]
pub struct InboxDeliveryListener {
    inbox: Arc<NotificationInbox>,
}

impl InboxDeliveryListener {
    /// Create a listener targeting an inbox.
    pub fn new(inbox: Arc<NotificationInbox>) -> Self {
        Self { inbox }
    }
}

#[async_trait]
impl DeliveryListener for InboxDeliveryListener {
    async fn on_delivered(&self, notification: LocalNotification) {
        self.inbox
            .add(Notification::new(
                notification.title,
                notification.body,
                notification.data,
            ))
            .await;
    }
}
