//! Device-local storage configuration.

use serde::{Deserialize, Serialize};

/// Device-local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider type: `"file"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Directory holding persisted values for the file provider.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_data_dir() -> String {
    "data/state".to_string()
}
