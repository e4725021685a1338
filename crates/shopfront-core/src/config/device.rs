//! Device identity and push notification configuration.

use serde::{Deserialize, Serialize};

/// Device identity and push notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Human-readable device name sent with push-token registration.
    #[serde(default = "default_device_name")]
    pub device_name: String,
    /// Push provider name.
    #[serde(default = "default_push_provider")]
    pub push_provider: String,
    /// Push provider token issued to this device, if any.
    #[serde(default)]
    pub push_token: Option<String>,
    /// Whether the user has granted local notification permission.
    #[serde(default = "default_true")]
    pub notification_permission: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            push_provider: default_push_provider(),
            push_token: None,
            notification_permission: true,
        }
    }
}

fn default_device_name() -> String {
    "shopfront-agent".to_string()
}

fn default_push_provider() -> String {
    "fcm".to_string()
}

fn default_true() -> bool {
    true
}
