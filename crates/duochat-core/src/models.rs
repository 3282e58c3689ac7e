//! Domain models for rooms and messages.
//!
//! Wire field names are camelCase to match the JSON payloads clients and
//! pub/sub subscribers already consume.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;
use crate::types::{RoomId, SessionToken};

/// Room metadata stored in the `meta:<roomId>` hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMeta {
    /// Ordered list of admitted session tokens, never more than capacity.
    pub connected: Vec<SessionToken>,
    /// Room creation time in unix milliseconds.
    pub created_at: i64,
}

/// Hash field holding the membership list.
pub const META_FIELD_CONNECTED: &str = "connected";
/// Hash field holding the creation timestamp.
pub const META_FIELD_CREATED_AT: &str = "createdAt";

impl RoomMeta {
    /// Metadata for a freshly created room with no members.
    pub fn initial() -> Self {
        Self {
            connected: Vec::new(),
            created_at: Utc::now().timestamp_millis(),
        }
    }

    /// Field/value pairs as written to the store hash. The membership
    /// list is kept as a JSON array in a single field so the store can
    /// mutate it atomically.
    pub fn hash_pairs(&self) -> AppResult<Vec<(String, String)>> {
        Ok(vec![
            (
                META_FIELD_CONNECTED.to_string(),
                serde_json::to_string(&self.connected)?,
            ),
            (META_FIELD_CREATED_AT.to_string(), self.created_at.to_string()),
        ])
    }

    /// Decode a membership list from its stored JSON form.
    pub fn parse_connected(raw: &str) -> AppResult<Vec<SessionToken>> {
        serde_json::from_str(raw).map_err(|e| {
            AppError::with_source(
                crate::error::ErrorKind::Serialization,
                "Corrupt membership list in room metadata",
                e,
            )
        })
    }
}

/// A chat message as stored in the `messages:<roomId>` list.
///
/// Carries the issuing session's token; the token is only ever echoed
/// back to its owner and is stripped before pub/sub fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    /// Opaque unique message id.
    pub id: String,
    /// Display name chosen by the sender.
    pub sender: String,
    /// Message body.
    pub text: String,
    /// Send time in unix milliseconds.
    pub timestamp: i64,
    /// The room this message belongs to.
    pub room_id: RoomId,
    /// The issuing session's token, used only for redaction.
    pub token: SessionToken,
}

impl StoredMessage {
    /// Build a new message record stamped with the current time.
    pub fn new(room_id: RoomId, token: SessionToken, sender: String, text: String) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            sender,
            text,
            timestamp: Utc::now().timestamp_millis(),
            room_id,
            token,
        }
    }

    /// View of this message for a listing caller: the embedded token is
    /// preserved only when it equals the caller's own token, otherwise
    /// the field is omitted entirely.
    pub fn redacted_for(&self, caller: &SessionToken) -> MessageView {
        MessageView {
            id: self.id.clone(),
            sender: self.sender.clone(),
            text: self.text.clone(),
            timestamp: self.timestamp,
            room_id: self.room_id.clone(),
            token: if &self.token == caller {
                Some(self.token.clone())
            } else {
                None
            },
        }
    }

    /// Token-free view published on the room's pub/sub channel.
    pub fn public_view(&self) -> MessageView {
        MessageView {
            id: self.id.clone(),
            sender: self.sender.clone(),
            text: self.text.clone(),
            timestamp: self.timestamp,
            room_id: self.room_id.clone(),
            token: None,
        }
    }
}

/// A message as exposed to clients and subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    /// Opaque unique message id.
    pub id: String,
    /// Display name chosen by the sender.
    pub sender: String,
    /// Message body.
    pub text: String,
    /// Send time in unix milliseconds.
    pub timestamp: i64,
    /// The room this message belongs to.
    pub room_id: RoomId,
    /// Present only on the caller's own messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<SessionToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction_keeps_own_token_only() {
        let mine = SessionToken::from_string("t1");
        let theirs = SessionToken::from_string("t2");
        let msg = StoredMessage::new(
            RoomId::from_string("r1"),
            mine.clone(),
            "alice".to_string(),
            "hi".to_string(),
        );

        assert_eq!(msg.redacted_for(&mine).token, Some(mine));
        assert_eq!(msg.redacted_for(&theirs).token, None);
    }

    #[test]
    fn test_redacted_token_is_absent_not_null() {
        let msg = StoredMessage::new(
            RoomId::from_string("r1"),
            SessionToken::from_string("t1"),
            "alice".to_string(),
            "hi".to_string(),
        );
        let view = msg.redacted_for(&SessionToken::from_string("other"));
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("token").is_none());
    }

    #[test]
    fn test_meta_hash_pairs_round_trip() {
        let meta = RoomMeta::initial();
        let pairs = meta.hash_pairs().unwrap();
        let connected = pairs
            .iter()
            .find(|(f, _)| f == META_FIELD_CONNECTED)
            .map(|(_, v)| v.clone())
            .unwrap();
        assert_eq!(RoomMeta::parse_connected(&connected).unwrap().len(), 0);
    }
}
