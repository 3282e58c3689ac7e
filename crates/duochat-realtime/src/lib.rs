//! # duochat-realtime
//!
//! Pub/sub fan-out for DuoChat. Each room owns one channel, named after
//! its room id; `chat.message` and `chat.destroy` events are emitted on
//! it fire-and-forget.
//!
//! Two providers are supported:
//!
//! - **memory**: per-channel `tokio::sync::broadcast`, single-node
//! - **redis**: Redis PUBLISH for multi-node deployments

#[cfg(feature = "memory")]
pub mod memory_pubsub;
pub mod publisher;
#[cfg(feature = "redis-pubsub")]
pub mod redis_pubsub;

pub use publisher::PubSubManager;
