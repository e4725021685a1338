//! Provider traits implemented across the Shopfront crates.

pub mod api;
pub mod cache;
pub mod notifier;
pub mod storage;
