//! Message exchange: append, fan-out, and history listing.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use duochat_core::error::AppError;
use duochat_core::events::ChatEvent;
use duochat_core::models::{MessageView, StoredMessage};
use duochat_core::result::AppResult;
use duochat_core::traits::publisher::EventPublisher;
use duochat_core::traits::store::KvStore;
use duochat_core::types::{RoomId, SessionToken};

use duochat_realtime::PubSubManager;
use duochat_store::{StoreManager, keys};

/// Appends messages to a room's history, fans them out over pub/sub,
/// and serves redacted history listings.
#[derive(Debug, Clone)]
pub struct MessageService {
    /// Key-value store.
    store: Arc<StoreManager>,
    /// Room pub/sub channels.
    publisher: Arc<PubSubManager>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(store: Arc<StoreManager>, publisher: Arc<PubSubManager>) -> Self {
        Self { store, publisher }
    }

    /// Appends a message to the room and notifies subscribers.
    ///
    /// The stored record carries the sender's token; the published
    /// `chat.message` event does not. Sending also refreshes the TTL on
    /// the room's message, history, and primary keys to whatever the
    /// metadata key has left, keeping the whole room on one clock.
    pub async fn send(
        &self,
        room_id: &RoomId,
        token: &SessionToken,
        sender: String,
        text: String,
    ) -> AppResult<MessageView> {
        let meta_key = keys::room_meta(room_id);
        if !self.store.exists(&meta_key).await? {
            return Err(AppError::not_found("Room not found"));
        }

        let message = StoredMessage::new(room_id.clone(), token.clone(), sender, text);
        let record = serde_json::to_string(&message)?;
        self.store
            .list_push(&keys::room_messages(room_id), &record)
            .await?;

        self.publisher
            .emit(
                room_id.as_str(),
                &ChatEvent::Message(message.public_view()),
            )
            .await?;

        self.refresh_room_keys(room_id, &meta_key).await?;

        debug!(room_id = %room_id, message_id = %message.id, "Message sent");
        Ok(message.public_view())
    }

    /// Lists the room's messages in send order, redacted for the caller:
    /// each message keeps its token only if it is the caller's own.
    pub async fn list(
        &self,
        room_id: &RoomId,
        caller: &SessionToken,
    ) -> AppResult<Vec<MessageView>> {
        if !self.store.exists(&keys::room_meta(room_id)).await? {
            return Err(AppError::not_found("Room not found"));
        }

        let raw = self
            .store
            .list_range(&keys::room_messages(room_id))
            .await?;

        let mut views = Vec::with_capacity(raw.len());
        for record in &raw {
            let stored: StoredMessage = serde_json::from_str(record)?;
            views.push(stored.redacted_for(caller));
        }
        Ok(views)
    }

    /// Re-aligns the auxiliary room keys to the metadata key's remaining
    /// TTL. A non-positive remainder means the meta key expired between
    /// the send and now; the auxiliary keys are deleted so the freshly
    /// written message list cannot outlive its room without an expiry.
    async fn refresh_room_keys(&self, room_id: &RoomId, meta_key: &str) -> AppResult<()> {
        let remaining = self.store.ttl(meta_key).await?;
        if remaining <= 0 {
            debug!(room_id = %room_id, "Room lapsed mid-send, dropping message keys");
            self.store.delete(&keys::room_messages(room_id)).await?;
            self.store.delete(&keys::room_history(room_id)).await?;
            self.store.delete(&keys::room_primary(room_id)).await?;
            return Ok(());
        }

        let window = Duration::from_secs(remaining as u64);
        self.store
            .expire(&keys::room_messages(room_id), window)
            .await?;
        self.store
            .expire(&keys::room_history(room_id), window)
            .await?;
        self.store
            .expire(&keys::room_primary(room_id), window)
            .await?;
        Ok(())
    }
}
