//! Pub/sub channel configuration.

use serde::{Deserialize, Serialize};

/// Top-level realtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Pub/sub provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Per-channel buffer size for the in-memory provider.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Redis pub/sub configuration.
    #[serde(default)]
    pub redis: RedisPubSubConfig,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            buffer_size: default_buffer_size(),
            redis: RedisPubSubConfig::default(),
        }
    }
}

/// Redis pub/sub backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisPubSubConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisPubSubConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_buffer_size() -> usize {
    64
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
