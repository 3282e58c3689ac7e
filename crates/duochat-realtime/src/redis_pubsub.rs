//! Redis pub/sub bridge for multi-node deployments.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use duochat_core::config::realtime::RedisPubSubConfig;
use duochat_core::error::{AppError, ErrorKind};
use duochat_core::events::ChatEvent;
use duochat_core::result::AppResult;
use duochat_core::traits::publisher::EventPublisher;

/// Redis pub/sub bridge publishing the `{event, payload}` envelope.
#[derive(Debug, Clone)]
pub struct RedisPubSub {
    /// Redis connection manager (pooled, reconnecting).
    conn: ConnectionManager,
}

impl RedisPubSub {
    /// Create a new Redis pub/sub bridge from configuration.
    pub async fn connect(config: &RedisPubSubConfig) -> AppResult<Self> {
        info!("Connecting pub/sub bridge to Redis");

        let client = redis::Client::open(config.url.as_str()).map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to create Redis client", e)
        })?;

        let conn = ConnectionManager::new(client).await.map_err(|e| {
            AppError::with_source(ErrorKind::Store, "Failed to connect to Redis", e)
        })?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl EventPublisher for RedisPubSub {
    async fn emit(&self, channel: &str, event: &ChatEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self.conn.clone();

        redis::cmd("PUBLISH")
            .arg(channel)
            .arg(&payload)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Store, format!("Redis PUBLISH failed: {e}"), e)
            })?;

        debug!(channel, event = event.name(), "Published event");
        Ok(())
    }
}
