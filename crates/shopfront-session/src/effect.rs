//! Post-transition side effects.

use shopfront_core::types::StoreId;

/// Side effects executed by the session controller after a state
/// transition.
///
/// Keeping them as an explicit list makes ordering and failure handling
/// visible and testable instead of implicit in lifecycle plumbing.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Register this device's push token for the store (fire-and-forget,
    /// failures logged only).
    RegisterPushToken(StoreId),
    /// Open the realtime channel for the store's room.
    ConnectRealtime(StoreId),
    /// Tear down the realtime channel.
    DisconnectRealtime,
}

/// Effects entering the authenticated state.
pub fn on_authenticated(store_id: &StoreId) -> Vec<Effect> {
    vec![
        Effect::RegisterPushToken(store_id.clone()),
        Effect::ConnectRealtime(store_id.clone()),
    ]
}

/// Effects leaving the authenticated state.
pub fn on_unauthenticated() -> Vec<Effect> {
    vec![Effect::DisconnectRealtime]
}
