//! Store manager that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use duochat_core::config::store::StoreConfig;
use duochat_core::error::AppError;
use duochat_core::result::AppResult;
use duochat_core::traits::store::{KvStore, MemberAdd};

/// Store manager that wraps the configured store provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store provider.
    inner: Arc<dyn KvStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub async fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn KvStore> = match config.provider.as_str() {
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis store provider");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisKvStore::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory store provider");
                Arc::new(crate::memory::MemoryKvStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, redis"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn KvStore>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl KvStore for StoreManager {
    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.inner.expire(key, ttl).await
    }

    async fn ttl(&self, key: &str) -> AppResult<i64> {
        self.inner.ttl(key).await
    }

    async fn hash_get(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        self.inner.hash_get(key, field).await
    }

    async fn hash_set_pairs(&self, key: &str, pairs: &[(String, String)]) -> AppResult<()> {
        self.inner.hash_set_pairs(key, pairs).await
    }

    async fn member_add(
        &self,
        key: &str,
        field: &str,
        member: &str,
        capacity: usize,
    ) -> AppResult<MemberAdd> {
        self.inner.member_add(key, field, member, capacity).await
    }

    async fn list_push(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.list_push(key, value).await
    }

    async fn list_range(&self, key: &str) -> AppResult<Vec<String>> {
        self.inner.list_range(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
