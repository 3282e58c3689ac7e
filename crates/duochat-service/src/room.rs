//! Room lifecycle: create, join, TTL queries, and teardown.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use duochat_core::config::room::RoomConfig;
use duochat_core::error::AppError;
use duochat_core::events::ChatEvent;
use duochat_core::models::{META_FIELD_CONNECTED, RoomMeta};
use duochat_core::result::AppResult;
use duochat_core::traits::publisher::EventPublisher;
use duochat_core::traits::store::{KvStore, MemberAdd};
use duochat_core::types::{RoomId, SessionToken};

use duochat_realtime::PubSubManager;
use duochat_store::{StoreManager, keys};

/// Result of a join call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A fresh token was minted and admitted to the room.
    Joined(SessionToken),
    /// The presented token is already a member; nothing changed.
    AlreadyJoined,
}

/// Creates rooms, admits members, answers TTL queries, and tears rooms
/// down. Membership is bounded by `room.capacity` (2) and enforced
/// atomically in the store.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Key-value store.
    store: Arc<StoreManager>,
    /// Room pub/sub channels.
    publisher: Arc<PubSubManager>,
    /// Room lifecycle settings.
    config: RoomConfig,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(store: Arc<StoreManager>, publisher: Arc<PubSubManager>, config: RoomConfig) -> Self {
        Self {
            store,
            publisher,
            config,
        }
    }

    /// The configured sliding inactivity window.
    fn room_ttl(&self) -> Duration {
        Duration::from_secs(self.config.ttl_seconds)
    }

    /// Creates a new room with empty membership and the full TTL window.
    pub async fn create(&self) -> AppResult<RoomId> {
        let room_id = RoomId::generate();
        let meta_key = keys::room_meta(&room_id);

        let meta = RoomMeta::initial();
        self.store
            .hash_set_pairs(&meta_key, &meta.hash_pairs()?)
            .await?;
        self.store.expire(&meta_key, self.room_ttl()).await?;

        info!(room_id = %room_id, "Room created");
        Ok(room_id)
    }

    /// Admits a party to the room.
    ///
    /// Idempotent when the presented token is already a member. Fails
    /// with `NotFound` when the room's metadata key is gone and with
    /// `Conflict` when the room already holds two members. The
    /// capacity check and the append run as one atomic store operation,
    /// so concurrent joins cannot overfill the room.
    pub async fn join(
        &self,
        room_id: &RoomId,
        existing_token: Option<&SessionToken>,
    ) -> AppResult<JoinOutcome> {
        let meta_key = keys::room_meta(room_id);

        if let Some(token) = existing_token {
            match self.store.hash_get(&meta_key, META_FIELD_CONNECTED).await? {
                Some(raw) => {
                    let connected = RoomMeta::parse_connected(&raw)?;
                    if connected.contains(token) {
                        debug!(room_id = %room_id, "Rejoin with known token");
                        return Ok(JoinOutcome::AlreadyJoined);
                    }
                }
                None => {
                    if !self.store.exists(&meta_key).await? {
                        return Err(AppError::not_found("Room not found"));
                    }
                }
            }
        }

        let token = SessionToken::generate();
        let outcome = self
            .store
            .member_add(
                &meta_key,
                META_FIELD_CONNECTED,
                token.as_str(),
                self.config.capacity,
            )
            .await?;

        match outcome {
            MemberAdd::Added => {
                info!(room_id = %room_id, "Party joined room");
                Ok(JoinOutcome::Joined(token))
            }
            MemberAdd::AtCapacity => Err(AppError::conflict("Room full")),
            MemberAdd::KeyMissing => Err(AppError::not_found("Room not found")),
            MemberAdd::AlreadyMember => {
                Err(AppError::internal("Freshly minted token already a member"))
            }
        }
    }

    /// Remaining seconds until the room expires, floored at 0.
    pub async fn ttl(&self, room_id: &RoomId) -> AppResult<u64> {
        let ttl = self.store.ttl(&keys::room_meta(room_id)).await?;
        Ok(ttl.max(0) as u64)
    }

    /// Tears the room down: deletes the primary, metadata, and message
    /// keys, then notifies subscribers.
    ///
    /// Deletions run before the `chat.destroy` publish. If any deletion
    /// fails the event is never emitted and the remaining keys lapse at
    /// their TTL, so subscribers are never told the room is gone while
    /// its keys are still observable.
    pub async fn destroy(&self, room_id: &RoomId) -> AppResult<()> {
        self.store.delete(&keys::room_primary(room_id)).await?;
        self.store.delete(&keys::room_meta(room_id)).await?;
        self.store.delete(&keys::room_messages(room_id)).await?;

        self.publisher
            .emit(room_id.as_str(), &ChatEvent::destroy())
            .await?;

        info!(room_id = %room_id, "Room destroyed");
        Ok(())
    }
}
