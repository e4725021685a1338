//! Local notification scheduling trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::notification::NotificationData;

/// An immediate-trigger local notification request.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    /// Title line shown to the user.
    pub title: String,
    /// Body text shown to the user.
    pub body: String,
    /// Structured payload mirroring the originating event, if any.
    pub data: Option<NotificationData>,
}

/// Trait for scheduling local notifications on the device.
///
/// Permission is queried before every schedule call; a denied permission
/// is a normal branch for callers, not an error.
#[async_trait]
pub trait LocalNotifier: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the user has granted notification permission.
    async fn permission_granted(&self) -> bool;

    /// Schedule an immediate local notification.
    async fn schedule(&self, request: LocalNotification) -> AppResult<()>;
}
