//! Request DTOs with validation rules.

use serde::Deserialize;
use validator::Validate;

use duochat_core::types::RoomId;

/// Query parameter carrying the target room id.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomIdQuery {
    /// The room the request targets.
    #[serde(rename = "roomId")]
    pub room_id: RoomId,
}

/// Body of `POST /api/messages`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Display name chosen by the sender.
    #[validate(length(min = 1, max = 100, message = "sender must be 1-100 characters"))]
    pub sender: String,
    /// Message body.
    #[validate(length(min = 1, max = 1000, message = "text must be 1-1000 characters"))]
    pub text: String,
}
