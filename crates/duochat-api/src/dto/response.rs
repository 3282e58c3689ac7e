//! Response DTOs. Wire field names are camelCase.

use serde::{Deserialize, Serialize};

use duochat_core::models::MessageView;
use duochat_core::types::RoomId;

/// Body of `POST /api/room/create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    /// The freshly minted room id.
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
}

/// Body of `POST /api/room/join`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    /// Always true on success.
    pub ok: bool,
}

/// Body of `GET /api/room/ttl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtlResponse {
    /// Remaining seconds until the room expires, floored at 0.
    pub ttl: u64,
}

/// Body of `GET /api/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageListResponse {
    /// All room messages in send order, redacted for the caller.
    pub messages: Vec<MessageView>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status, `"ok"` when serving.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Body of `GET /api/health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Store reachability, `"connected"` or `"unreachable"`.
    pub store: String,
}
