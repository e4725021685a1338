//! The reqwest-backed backend client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::watch;
use tracing::{debug, warn};

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;
use shopfront_core::config::ApiConfig;
use shopfront_core::traits::api::{BackendApi, PushTokenRegistration, TokenValidation};
use shopfront_storage::TokenStore;

use crate::signal::SessionSignal;

/// Authenticated HTTP client for the Shopfront backend.
///
/// The credential is read from the [`TokenStore`] at request time, never
/// cached in memory, so every request reflects the latest stored value.
#[derive(Debug)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<TokenStore>,
    signal_tx: watch::Sender<SessionSignal>,
}

impl HttpBackend {
    /// Build a client from configuration.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        let (signal_tx, _) = watch::channel(SessionSignal::Active);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
            signal_tx,
        })
    }

    /// Subscribe to session signals. `Expired` is the headless analogue
    /// of redirecting the UI to the sign-in entry point.
    pub fn session_signals(&self) -> watch::Receiver<SessionSignal> {
        self.signal_tx.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored credential and send, enforcing the expiry policy.
    ///
    /// No endpoint opts out of this path; it is the single point of truth
    /// for "session has expired".
    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let request = match self.tokens.credential().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Network, format!("Request failed: {e}"), e)
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "Authorization failure, ending session");
            self.tokens.clear_credential().await;
            let _ = self.signal_tx.send(SessionSignal::Expired);
            return Err(AppError::authentication("Session expired"));
        }

        if !status.is_success() {
            return Err(AppError::network(format!(
                "Backend returned {status} for {}",
                response.url()
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn validate_token(&self) -> AppResult<TokenValidation> {
        let response = self.send(self.http.get(self.url("/auth/validate"))).await?;
        let validation: TokenValidation = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Invalid validation response: {e}"),
                e,
            )
        })?;
        debug!(valid = validation.valid, "Credential validated");
        Ok(validation)
    }

    async fn register_push_token(&self, registration: &PushTokenRegistration) -> AppResult<()> {
        self.send(
            self.http
                .post(self.url("/devices/push-token"))
                .json(registration),
        )
        .await?;
        debug!(
            provider = %registration.provider,
            device_id = %registration.device_id,
            "Push token registered"
        );
        Ok(())
    }
}
