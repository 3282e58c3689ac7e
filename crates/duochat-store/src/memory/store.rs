//! In-memory store implementation using dashmap.
//!
//! Used for tests and single-node development. Expiry is lazy: a key's
//! deadline is checked on access and expired entries are dropped then.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use duochat_core::error::AppError;
use duochat_core::result::AppResult;
use duochat_core::traits::store::{KvStore, MemberAdd};

/// The value shapes a key can hold.
#[derive(Debug, Clone)]
enum Value {
    Hash(HashMap<String, String>),
    List(Vec<String>),
}

/// One stored key with an optional expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// In-memory key-value store.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    /// Key → entry. The per-key dashmap lock makes each method atomic,
    /// including the bounded membership add.
    entries: DashMap<String, Entry>,
}

impl MemoryKvStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Drop the entry if its deadline has passed.
    fn purge_if_expired(&self, key: &str) {
        self.entries.remove_if(key, |_, entry| entry.is_expired());
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.purge_if_expired(key);
        Ok(self.entries.contains_key(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        self.purge_if_expired(key);
        match self.entries.get_mut(key) {
            Some(mut entry) => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> AppResult<i64> {
        self.purge_if_expired(key);
        match self.entries.get(key) {
            Some(entry) => match entry.expires_at {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    Ok(remaining.as_secs() as i64)
                }
                None => Ok(-1),
            },
            None => Ok(-2),
        }
    }

    async fn hash_get(&self, key: &str, field: &str) -> AppResult<Option<String>> {
        self.purge_if_expired(key);
        match self.entries.get(key) {
            Some(entry) => match &entry.value {
                Value::Hash(fields) => Ok(fields.get(field).cloned()),
                Value::List(_) => Err(wrong_type(key)),
            },
            None => Ok(None),
        }
    }

    async fn hash_set_pairs(&self, key: &str, pairs: &[(String, String)]) -> AppResult<()> {
        self.purge_if_expired(key);
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: Value::Hash(HashMap::new()),
            expires_at: None,
        });
        match &mut entry.value {
            Value::Hash(fields) => {
                for (field, value) in pairs {
                    fields.insert(field.clone(), value.clone());
                }
                Ok(())
            }
            Value::List(_) => Err(wrong_type(key)),
        }
    }

    async fn member_add(
        &self,
        key: &str,
        field: &str,
        member: &str,
        capacity: usize,
    ) -> AppResult<MemberAdd> {
        self.purge_if_expired(key);
        let Some(mut entry) = self.entries.get_mut(key) else {
            return Ok(MemberAdd::KeyMissing);
        };

        let Value::Hash(fields) = &mut entry.value else {
            return Err(wrong_type(key));
        };

        let mut members: Vec<String> = match fields.get(field) {
            Some(raw) => serde_json::from_str(raw)?,
            None => Vec::new(),
        };

        if members.iter().any(|m| m == member) {
            return Ok(MemberAdd::AlreadyMember);
        }
        if members.len() >= capacity {
            return Ok(MemberAdd::AtCapacity);
        }

        members.push(member.to_string());
        fields.insert(field.to_string(), serde_json::to_string(&members)?);
        Ok(MemberAdd::Added)
    }

    async fn list_push(&self, key: &str, value: &str) -> AppResult<()> {
        self.purge_if_expired(key);
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
            value: Value::List(Vec::new()),
            expires_at: None,
        });
        match &mut entry.value {
            Value::List(items) => {
                items.push(value.to_string());
                Ok(())
            }
            Value::Hash(_) => Err(wrong_type(key)),
        }
    }

    async fn list_range(&self, key: &str) -> AppResult<Vec<String>> {
        self.purge_if_expired(key);
        match self.entries.get(key) {
            Some(entry) => match &entry.value {
                Value::List(items) => Ok(items.clone()),
                Value::Hash(_) => Err(wrong_type(key)),
            },
            None => Ok(Vec::new()),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

fn wrong_type(key: &str) -> AppError {
    AppError::store(format!("Key '{key}' holds a different value type"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_hash_set_and_get() {
        let store = MemoryKvStore::new();
        store
            .hash_set_pairs("meta:r1", &pairs(&[("connected", "[]"), ("createdAt", "0")]))
            .await
            .unwrap();

        assert_eq!(
            store.hash_get("meta:r1", "connected").await.unwrap(),
            Some("[]".to_string())
        );
        assert_eq!(store.hash_get("meta:r1", "absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_push_order() {
        let store = MemoryKvStore::new();
        store.list_push("messages:r1", "a").await.unwrap();
        store.list_push("messages:r1", "b").await.unwrap();

        assert_eq!(
            store.list_range("messages:r1").await.unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ttl_semantics() {
        let store = MemoryKvStore::new();
        assert_eq!(store.ttl("nope").await.unwrap(), -2);

        store
            .hash_set_pairs("meta:r1", &pairs(&[("connected", "[]")]))
            .await
            .unwrap();
        assert_eq!(store.ttl("meta:r1").await.unwrap(), -1);

        assert!(store
            .expire("meta:r1", Duration::from_secs(600))
            .await
            .unwrap());
        let ttl = store.ttl("meta:r1").await.unwrap();
        assert!(ttl > 0 && ttl <= 600);
    }

    #[tokio::test]
    async fn test_expire_on_missing_key_is_noop() {
        let store = MemoryKvStore::new();
        assert!(!store.expire("ghost", Duration::from_secs(10)).await.unwrap());
        assert!(!store.exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_key_is_gone() {
        let store = MemoryKvStore::new();
        store
            .hash_set_pairs("meta:r1", &pairs(&[("connected", "[]")]))
            .await
            .unwrap();
        store
            .expire("meta:r1", Duration::from_millis(10))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(!store.exists("meta:r1").await.unwrap());
        assert_eq!(store.ttl("meta:r1").await.unwrap(), -2);
    }

    #[tokio::test]
    async fn test_member_add_outcomes() {
        let store = MemoryKvStore::new();

        assert_eq!(
            store.member_add("meta:r1", "connected", "t1", 2).await.unwrap(),
            MemberAdd::KeyMissing
        );

        store
            .hash_set_pairs("meta:r1", &pairs(&[("connected", "[]")]))
            .await
            .unwrap();

        assert_eq!(
            store.member_add("meta:r1", "connected", "t1", 2).await.unwrap(),
            MemberAdd::Added
        );
        assert_eq!(
            store.member_add("meta:r1", "connected", "t1", 2).await.unwrap(),
            MemberAdd::AlreadyMember
        );
        assert_eq!(
            store.member_add("meta:r1", "connected", "t2", 2).await.unwrap(),
            MemberAdd::Added
        );
        assert_eq!(
            store.member_add("meta:r1", "connected", "t3", 2).await.unwrap(),
            MemberAdd::AtCapacity
        );

        let raw = store.hash_get("meta:r1", "connected").await.unwrap().unwrap();
        let members: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(members, vec!["t1".to_string(), "t2".to_string()]);
    }
}
