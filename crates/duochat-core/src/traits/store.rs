//! Key-value store trait for pluggable backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Outcome of an atomic bounded membership add.
///
/// Produced by [`KvStore::member_add`]. The check-and-append runs as one
/// atomic operation, so concurrent joins can never admit more members
/// than the capacity allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAdd {
    /// The member was appended to the list.
    Added,
    /// The member was already present; nothing changed.
    AlreadyMember,
    /// The list already holds `capacity` members.
    AtCapacity,
    /// The hash key does not exist (expired or never created).
    KeyMissing,
}

/// Trait for key-value store backends (Redis or in-memory).
///
/// The store provides hashes, ordered lists, key expiry, and existence
/// checks. Every method is a single atomic command from the caller's
/// point of view; the service layer composes them without any further
/// coordination.
#[async_trait]
pub trait KvStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Set the TTL on an existing key. Returns `false` if the key does
    /// not exist (the expiry is then a no-op, matching Redis EXPIRE).
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Remaining TTL of a key in seconds, with Redis semantics:
    /// `-2` if the key does not exist, `-1` if it has no expiry.
    async fn ttl(&self, key: &str) -> AppResult<i64>;

    /// Read a single hash field.
    async fn hash_get(&self, key: &str, field: &str) -> AppResult<Option<String>>;

    /// Write multiple hash fields at once.
    async fn hash_set_pairs(&self, key: &str, pairs: &[(String, String)]) -> AppResult<()>;

    /// Atomically add `member` to the JSON array stored in `field` of the
    /// hash at `key`, but only while the array holds fewer than
    /// `capacity` entries. See [`MemberAdd`] for the possible outcomes.
    async fn member_add(
        &self,
        key: &str,
        field: &str,
        member: &str,
        capacity: usize,
    ) -> AppResult<MemberAdd>;

    /// Append a value to the tail of the ordered list at `key`.
    async fn list_push(&self, key: &str, value: &str) -> AppResult<()>;

    /// Read the whole ordered list at `key`, head to tail.
    async fn list_range(&self, key: &str) -> AppResult<Vec<String>>;

    /// Check that the store backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
