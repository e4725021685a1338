//! The locally persisted notification model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{NotificationId, OrderId};

/// A single user-facing notification in the on-device inbox.
///
/// Notifications are created when a push notification is delivered while
/// the client is foregrounded, or when a known realtime domain event
/// arrives. The inbox keeps them newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Short title line.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the user has read this notification.
    pub read: bool,
    /// Structured payload mirroring the originating event, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NotificationData>,
}

/// Structured order payload carried by order-related notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Backend order identifier.
    pub order_id: OrderId,
    /// Human-facing order number.
    pub order_number: String,
    /// Order total in centavos.
    pub total: i64,
}

impl Notification {
    /// Create a fresh unread notification with a generated ID.
    pub fn new(title: impl Into<String>, body: impl Into<String>, data: Option<NotificationData>) -> Self {
        Self {
            id: NotificationId::generate(),
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
            read: false,
            data,
        }
    }
}
