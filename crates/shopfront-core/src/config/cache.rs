//! Query cache configuration.

use serde::{Deserialize, Serialize};

/// Query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached query results.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live for cached query results in seconds.
    #[serde(default = "default_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_ttl(),
        }
    }
}

fn default_max_capacity() -> u64 {
    1_000
}

fn default_ttl() -> u64 {
    300
}
