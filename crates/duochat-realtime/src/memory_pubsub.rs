//! In-memory pub/sub for single-node deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::sync::broadcast;

use duochat_core::events::ChatEvent;
use duochat_core::result::AppResult;
use duochat_core::traits::publisher::EventPublisher;

/// In-memory pub/sub implementation.
#[derive(Debug)]
pub struct MemoryPubSub {
    /// Channel name → broadcast sender
    channels: RwLock<HashMap<String, broadcast::Sender<ChatEvent>>>,
    /// Buffer size for channels
    buffer_size: usize,
}

impl MemoryPubSub {
    /// Create a new in-memory pub/sub
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            buffer_size,
        }
    }

    /// Subscribe to a channel, returns a receiver
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<ChatEvent> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.buffer_size).0);
        tx.subscribe()
    }
}

#[async_trait]
impl EventPublisher for MemoryPubSub {
    async fn emit(&self, channel: &str, event: &ChatEvent) -> AppResult<()> {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(channel) {
            // Nobody listening is fine; fan-out has no delivery guarantee.
            let _ = tx.send(event.clone());
        }
        Ok(())
    }
}
