//! The persisted notification inbox.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use shopfront_core::traits::storage::DeviceStorage;
use shopfront_core::types::{Notification, NotificationId};

/// Storage key for the serialized inbox list.
const INBOX_KEY: &str = "notifications.inbox";

#[derive(Debug, Default)]
struct InboxState {
    /// Newest-first list of notifications.
    items: Vec<Notification>,
    /// Count of entries with `read == false`.
    unread: usize,
}

/// An ordered, persisted list of user-facing notifications.
///
/// The list is maintained newest-first; insertion always prepends. Every
/// mutation persists the full list (lists are bounded by user-visible
/// history) and recomputes the unread count from the resulting list so
/// the derived value can never drift.
///
/// Both the push-delivery path and the realtime-event path insert
/// through [`add`](Self::add).
#[derive(Debug)]
pub struct NotificationInbox {
    storage: Arc<dyn DeviceStorage>,
    state: Mutex<InboxState>,
}

impl NotificationInbox {
    /// Create an empty inbox over a storage provider. Call
    /// [`load`](Self::load) to hydrate persisted state.
    pub fn new(storage: Arc<dyn DeviceStorage>) -> Self {
        Self {
            storage,
            state: Mutex::new(InboxState::default()),
        }
    }

    /// Hydrate the inbox from persisted storage.
    ///
    /// A missing or corrupt entry yields an empty list, never an error.
    pub async fn load(&self) -> Vec<Notification> {
        let items = match self.storage.read(INBOX_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Notification>>(&json) {
                Ok(items) => items,
                Err(e) => {
                    warn!(error = %e, "Persisted inbox is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted inbox, starting empty");
                Vec::new()
            }
        };

        let mut state = self.state.lock().await;
        state.unread = recount(&items);
        state.items = items.clone();
        debug!(count = items.len(), unread = state.unread, "Inbox loaded");
        items
    }

    /// Prepend a notification and persist.
    pub async fn add(&self, notification: Notification) {
        let mut state = self.state.lock().await;
        state.items.insert(0, notification);
        state.unread = recount(&state.items);
        self.persist(&state).await;
    }

    /// Mark a single notification as read.
    pub async fn mark_as_read(&self, id: &NotificationId) {
        let mut state = self.state.lock().await;
        if let Some(item) = state.items.iter_mut().find(|n| &n.id == id) {
            item.read = true;
        }
        state.unread = recount(&state.items);
        self.persist(&state).await;
    }

    /// Mark every notification as read.
    pub async fn mark_all_as_read(&self) {
        let mut state = self.state.lock().await;
        for item in &mut state.items {
            item.read = true;
        }
        state.unread = 0;
        self.persist(&state).await;
    }

    /// Remove a notification. Removing an absent id is a no-op.
    pub async fn remove(&self, id: &NotificationId) {
        let mut state = self.state.lock().await;
        state.items.retain(|n| &n.id != id);
        state.unread = recount(&state.items);
        self.persist(&state).await;
    }

    /// Empty the inbox and persist the empty state.
    pub async fn clear_all(&self) {
        let mut state = self.state.lock().await;
        state.items.clear();
        state.unread = 0;
        self.persist(&state).await;
    }

    /// Current notifications, newest first.
    pub async fn snapshot(&self) -> Vec<Notification> {
        self.state.lock().await.items.clone()
    }

    /// Count of unread notifications.
    pub async fn unread_count(&self) -> usize {
        self.state.lock().await.unread
    }

    /// Persist the full list. Persistence failures are logged, not raised.
    async fn persist(&self, state: &InboxState) {
        match serde_json::to_string(&state.items) {
            Ok(json) => {
                if let Err(e) = self.storage.write(INBOX_KEY, &json).await {
                    warn!(error = %e, "Failed to persist inbox");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize inbox"),
        }
    }
}

/// Recompute the unread count from a list.
///
/// Always derived from the full list rather than adjusted in place, so
/// the count stays correct regardless of the mutation that preceded it.
fn recount(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.read).count()
}
