//! Backend API trait consumed by the session controller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::profile::Profile;

/// Response of the credential validation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenValidation {
    /// Whether the stored credential is still accepted.
    pub valid: bool,
    /// The profile of the authenticated user, when valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Profile>,
}

/// Payload of the push-token registration endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushTokenRegistration {
    /// The push provider token issued to this device.
    pub token: String,
    /// Push provider name (e.g. `"fcm"`).
    pub provider: String,
    /// Store the device belongs to.
    pub store_id: String,
    /// Stable device identifier.
    pub device_id: String,
    /// Human-readable device name.
    pub device_name: String,
}

/// The REST surface the client core depends on.
///
/// The production implementation (`shopfront-api::HttpBackend`) attaches
/// the stored credential to every request and enforces the session-expiry
/// policy. Tests substitute a scripted fake.
#[async_trait]
pub trait BackendApi: Send + Sync + std::fmt::Debug + 'static {
    /// Validate the stored credential against the backend.
    async fn validate_token(&self) -> AppResult<TokenValidation>;

    /// Register this device's push token with the backend.
    async fn register_push_token(&self, registration: &PushTokenRegistration) -> AppResult<()>;
}
