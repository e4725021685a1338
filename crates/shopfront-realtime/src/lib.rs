//! # shopfront-realtime
//!
//! The realtime channel: a single persistent WebSocket connection per
//! authenticated session, joined to the store's logical room. Inbound
//! domain events fan out to the cache invalidation bridge and the local
//! notification path; a degraded channel never affects foreground
//! interaction.

pub mod channel;
pub mod message;
pub mod sink;

pub use channel::{RealtimeChannel, RoomJoin};
pub use sink::{EventSink, OrderEventSink};
