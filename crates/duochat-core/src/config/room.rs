//! Room lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Room lifecycle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Sliding inactivity window in seconds. Every room key is created
    /// with this TTL and refreshed on message activity.
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
    /// Maximum number of session tokens admitted to a room.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            capacity: default_capacity(),
        }
    }
}

fn default_ttl_seconds() -> u64 {
    600
}

fn default_capacity() -> usize {
    2
}
