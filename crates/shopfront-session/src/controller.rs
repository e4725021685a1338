//! The session controller state machine.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use shopfront_api::SessionSignal;
use shopfront_core::config::DeviceConfig;
use shopfront_core::traits::api::{BackendApi, PushTokenRegistration, TokenValidation};
use shopfront_core::types::{Profile, StoreId};
use shopfront_realtime::RealtimeChannel;
use shopfront_storage::TokenStore;
use shopfront_storage::identity::DeviceIdentity;

use crate::effect::{self, Effect};

/// Derived, in-memory session state. Never persisted directly; the
/// credential in the token store is what persists.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Credential validation is in flight at startup.
    Loading,
    /// A validated session with its profile.
    Authenticated(Profile),
    /// No live session.
    Unauthenticated,
}

/// Orchestrates the authentication lifecycle.
///
/// Owns the only transitions of [`SessionState`] and executes the
/// explicit effect list after each one. State is broadcast through a
/// watch channel; consumers receive it as a read-only subscription
/// handle rather than an ambient lookup.
#[derive(Debug)]
pub struct SessionController {
    tokens: Arc<TokenStore>,
    api: Arc<dyn BackendApi>,
    realtime: Arc<RealtimeChannel>,
    device: DeviceIdentity,
    device_config: DeviceConfig,
    state_tx: watch::Sender<SessionState>,
}

impl SessionController {
    /// Create a controller in the `Loading` state.
    pub fn new(
        tokens: Arc<TokenStore>,
        api: Arc<dyn BackendApi>,
        realtime: Arc<RealtimeChannel>,
        device: DeviceIdentity,
        device_config: DeviceConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        Self {
            tokens,
            api,
            realtime,
            device,
            device_config,
            state_tx,
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// The current session state.
    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// Restore a persisted session at startup.
    ///
    /// No credential resolves directly to `Unauthenticated`. A present
    /// credential is validated against the backend; any failure (network,
    /// timeout, or rejection) clears it so a stale credential is never
    /// left live.
    pub async fn bootstrap(&self) {
        if self.tokens.credential().await.is_none() {
            debug!("No stored credential");
            self.transition(SessionState::Unauthenticated);
            return;
        }

        match self.api.validate_token().await {
            Ok(TokenValidation {
                valid: true,
                user: Some(profile),
            }) => {
                info!(store_id = %profile.id, "Session restored");
                // Refresh the cached profile alongside the token.
                if let Some(token) = self.tokens.credential().await {
                    self.tokens.save_credential(&token, &profile).await;
                }
                self.enter_authenticated(profile).await;
            }
            Ok(_) => {
                info!("Stored credential rejected by backend");
                self.tokens.clear_credential().await;
                self.transition(SessionState::Unauthenticated);
            }
            Err(e) => {
                warn!(error = %e, "Credential validation failed");
                self.tokens.clear_credential().await;
                self.transition(SessionState::Unauthenticated);
            }
        }
    }

    /// Enter the authenticated state after a completed sign-in round-trip.
    ///
    /// Does not validate; it trusts the caller's just-completed
    /// authentication.
    pub async fn sign_in(&self, token: &str, profile: Profile) {
        self.tokens.save_credential(token, &profile).await;
        self.enter_authenticated(profile).await;
    }

    /// Clear the credential and leave the authenticated state.
    pub async fn sign_out(&self) {
        self.tokens.clear_credential().await;
        self.transition(SessionState::Unauthenticated);
        self.apply_effects(effect::on_unauthenticated()).await;
    }

    /// React to an authorization failure observed mid-session. The HTTP
    /// client has already cleared the credential.
    pub async fn on_session_expired(&self) {
        self.transition(SessionState::Unauthenticated);
        self.apply_effects(effect::on_unauthenticated()).await;
    }

    /// Watch the HTTP client's session signals for expiry.
    pub fn spawn_expiry_watcher(
        self: &Arc<Self>,
        mut signals: watch::Receiver<SessionSignal>,
    ) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            while signals.changed().await.is_ok() {
                if *signals.borrow_and_update() == SessionSignal::Expired {
                    info!("Session expiry signal received");
                    controller.on_session_expired().await;
                }
            }
        })
    }

    async fn enter_authenticated(&self, profile: Profile) {
        let store_id = profile.id.clone();
        self.transition(SessionState::Authenticated(profile));
        self.apply_effects(effect::on_authenticated(&store_id)).await;
    }

    fn transition(&self, next: SessionState) {
        self.state_tx.send_replace(next);
    }

    /// Execute post-transition effects in order. Every effect is
    /// best-effort; failures are logged and never unwind the transition.
    async fn apply_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RegisterPushToken(store_id) => {
                    self.register_push_token(&store_id).await;
                }
                Effect::ConnectRealtime(store_id) => {
                    if self.realtime.connect(&store_id).await.is_none() {
                        debug!(%store_id, "Realtime channel unavailable, continuing degraded");
                    }
                }
                Effect::DisconnectRealtime => {
                    self.realtime.disconnect().await;
                }
            }
        }
    }

    async fn register_push_token(&self, store_id: &StoreId) {
        let Some(push_token) = self.device_config.push_token.clone() else {
            debug!("No push token configured, skipping registration");
            return;
        };

        let registration = PushTokenRegistration {
            token: push_token,
            provider: self.device_config.push_provider.clone(),
            store_id: store_id.clone().into_string(),
            device_id: self.device.device_id.clone(),
            device_name: self.device.device_name.clone(),
        };

        if let Err(e) = self.api.register_push_token(&registration).await {
            warn!(error = %e, "Push token registration failed");
        }
    }
}
