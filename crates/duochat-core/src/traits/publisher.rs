//! Pub/sub publisher trait for pluggable fan-out backends.

use async_trait::async_trait;

use crate::events::ChatEvent;
use crate::result::AppResult;

/// Trait for pub/sub backends (Redis PUBLISH or in-memory broadcast).
///
/// Publishing is fire-and-forget: there is no acknowledgment, no
/// delivery guarantee, and no buffering for offline subscribers.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    /// Emit an event on the named channel.
    ///
    /// Channels are room-scoped: the channel name is the room id.
    async fn emit(&self, channel: &str, event: &ChatEvent) -> AppResult<()>;
}
