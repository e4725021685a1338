//! Stable device identity.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use shopfront_core::result::AppResult;
use shopfront_core::traits::storage::DeviceStorage;

/// Storage key for the generated device identifier.
const DEVICE_ID_KEY: &str = "device.id";

/// Identity reported during push-token registration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceIdentity {
    /// Stable identifier, generated once and persisted.
    pub device_id: String,
    /// Human-readable device name from configuration.
    pub device_name: String,
}

/// Load the persisted device ID, generating one on first run.
pub async fn device_identity(
    storage: &Arc<dyn DeviceStorage>,
    device_name: &str,
) -> AppResult<DeviceIdentity> {
    let device_id = match storage.read(DEVICE_ID_KEY).await? {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4().to_string();
            storage.write(DEVICE_ID_KEY, &id).await?;
            info!(device_id = %id, "Generated device identity");
            id
        }
    };

    Ok(DeviceIdentity {
        device_id,
        device_name: device_name.to_string(),
    })
}
