//! # shopfront-notify
//!
//! The on-device notification inbox (ordered, persisted, with unread
//! accounting) and the in-process local notification dispatcher.

pub mod dispatcher;
pub mod inbox;

pub use dispatcher::{DeliveryListener, InProcessNotifier, InboxDeliveryListener};
pub use inbox::NotificationInbox;
