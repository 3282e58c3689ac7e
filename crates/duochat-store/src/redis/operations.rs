//! Redis store provider implementation.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use duochat_core::error::{AppError, ErrorKind};
use duochat_core::result::AppResult;
use duochat_core::traits::store::{KvStore, MemberAdd};

use super::client::RedisClient;

/// Atomic bounded membership add.
///
/// Decodes the JSON array held in a hash field, and appends the new
/// member only while the array is below capacity. Running as a script
/// keeps the check-and-append a single step on the server, so two
/// racing joins can never both slip past the capacity check.
const MEMBER_ADD_SCRIPT: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return 'missing'
end
local raw = redis.call('HGET', KEYS[1], ARGV[1])
local members = {}
if raw then
    members = cjson.decode(raw)
end
for _, m in ipairs(members) do
    if m == ARGV[2] then
        return 'present'
    end
end
if #members >= tonumber(ARGV[3]) then
    return 'full'
end
table.insert(members, ARGV[2])
redis.call('HSET', KEYS[1], ARGV[1], cjson.encode(members))
return 'added'
"#;

/// Redis-backed key-value store.
#[derive(Debug, Clone)]
pub struct RedisKvStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisKvStore {
    /// Create a new Redis store provider.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Store, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl KvStore for RedisKvStore {
    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(&full_key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: bool = conn
            .expire(&full_key, ttl.as_secs() as i64)
            .await
            .map_err(Self::map_err)?;
        Ok(result)
    }

    async fn ttl(&self, key: &str) -> AppResult<i64> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: i64 = conn.ttl(&full_key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn hash_get(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.hget(&full_key, field).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn hash_set_pairs(&self, key: &str, pairs: &[(String, String)]) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn
            .hset_multiple(&full_key, pairs)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn member_add(
        &self,
        key: &str,
        field: &str,
        member: &str,
        capacity: usize,
    ) -> AppResult<MemberAdd> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();

        let outcome: String = redis::Script::new(MEMBER_ADD_SCRIPT)
            .key(&full_key)
            .arg(field)
            .arg(member)
            .arg(capacity)
            .invoke_async(&mut conn)
            .await
            .map_err(Self::map_err)?;

        match outcome.as_str() {
            "added" => Ok(MemberAdd::Added),
            "present" => Ok(MemberAdd::AlreadyMember),
            "full" => Ok(MemberAdd::AtCapacity),
            "missing" => Ok(MemberAdd::KeyMissing),
            other => Err(AppError::store(format!(
                "Unexpected member_add script result: {other}"
            ))),
        }
    }

    async fn list_push(&self, key: &str, value: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let _: () = conn.rpush(&full_key, value).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn list_range(&self, key: &str) -> AppResult<Vec<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let result: Vec<String> = conn
            .lrange(&full_key, 0, -1)
            .await
            .map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
