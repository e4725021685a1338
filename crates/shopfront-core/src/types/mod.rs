//! Shared domain types for the Shopfront client.

pub mod id;
pub mod money;
pub mod notification;
pub mod profile;

pub use id::{NotificationId, OrderId, StoreId};
pub use notification::{Notification, NotificationData};
pub use profile::Profile;
