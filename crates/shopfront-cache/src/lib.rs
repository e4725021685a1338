//! # shopfront-cache
//!
//! The query cache layer: an in-memory provider (moka), central cache
//! key builders, and the bridge that marks caches stale when realtime
//! domain events arrive.

pub mod bridge;
pub mod keys;
pub mod memory;

pub use bridge::InvalidationBridge;
pub use memory::MemoryQueryCache;
