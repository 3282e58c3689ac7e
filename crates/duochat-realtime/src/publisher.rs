//! Pub/sub manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use duochat_core::config::realtime::RealtimeConfig;
use duochat_core::error::AppError;
use duochat_core::events::ChatEvent;
use duochat_core::result::AppResult;
use duochat_core::traits::publisher::EventPublisher;

/// Pub/sub manager that wraps the configured publisher.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct PubSubManager {
    /// The inner publisher.
    inner: Arc<dyn EventPublisher>,
}

impl PubSubManager {
    /// Create a new pub/sub manager from configuration.
    pub async fn new(config: &RealtimeConfig) -> AppResult<Self> {
        let inner: Arc<dyn EventPublisher> = match config.provider.as_str() {
            #[cfg(feature = "redis-pubsub")]
            "redis" => {
                info!("Initializing Redis pub/sub provider");
                Arc::new(crate::redis_pubsub::RedisPubSub::connect(&config.redis).await?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory pub/sub provider");
                Arc::new(crate::memory_pubsub::MemoryPubSub::new(config.buffer_size))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown pub/sub provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a pub/sub manager from an existing publisher (for testing).
    pub fn from_publisher(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { inner: publisher }
    }
}

#[async_trait]
impl EventPublisher for PubSubManager {
    async fn emit(&self, channel: &str, event: &ChatEvent) -> AppResult<()> {
        self.inner.emit(channel, event).await
    }
}
