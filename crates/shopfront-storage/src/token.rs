//! The token store: persisted credential and cached profile.

use std::sync::Arc;

use tracing::{debug, warn};

use shopfront_core::traits::storage::DeviceStorage;
use shopfront_core::types::profile::Profile;

/// Storage key for the bearer token.
const TOKEN_KEY: &str = "auth.token";
/// Storage key for the serialized cached profile.
const PROFILE_KEY: &str = "auth.profile";

/// Persists and retrieves the authentication credential and the cached
/// user profile.
///
/// A failed save means the user may need to re-authenticate on the next
/// launch, so persistence failures are logged rather than raised; no
/// other state depends on the write synchronously.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: Arc<dyn DeviceStorage>,
}

impl TokenStore {
    /// Create a token store over a device storage provider.
    pub fn new(storage: Arc<dyn DeviceStorage>) -> Self {
        Self { storage }
    }

    /// Persist the credential and the profile it was issued for.
    pub async fn save_credential(&self, token: &str, profile: &Profile) {
        if let Err(e) = self.storage.write(TOKEN_KEY, token).await {
            warn!(error = %e, "Failed to persist credential");
        }
        match serde_json::to_string(profile) {
            Ok(json) => {
                if let Err(e) = self.storage.write(PROFILE_KEY, &json).await {
                    warn!(error = %e, "Failed to persist profile");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize profile"),
        }
        debug!(store_id = %profile.id, "Credential saved");
    }

    /// Read the stored credential. Absence is a normal outcome.
    pub async fn credential(&self) -> Option<String> {
        match self.storage.read(TOKEN_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to read credential");
                None
            }
        }
    }

    /// Read the cached profile. A corrupt entry is treated as absent.
    pub async fn profile(&self) -> Option<Profile> {
        let json = match self.storage.read(PROFILE_KEY).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Cached profile is corrupt, ignoring");
                None
            }
        }
    }

    /// Remove the credential and cached profile. Idempotent.
    pub async fn clear_credential(&self) {
        for key in [TOKEN_KEY, PROFILE_KEY] {
            if let Err(e) = self.storage.delete(key).await {
                warn!(key, error = %e, "Failed to clear stored value");
            }
        }
    }

    /// Raw access for values outside the credential keys.
    pub fn storage(&self) -> &Arc<dyn DeviceStorage> {
        &self.storage
    }
}
