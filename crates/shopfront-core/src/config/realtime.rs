//! Realtime channel configuration.

use serde::{Deserialize, Serialize};

/// Realtime (WebSocket) channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket URL of the backend realtime endpoint.
    #[serde(default = "default_url")]
    pub url: String,
    /// Buffer size of the outbound message queue.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:3333/ws".to_string()
}

fn default_channel_buffer() -> usize {
    64
}
