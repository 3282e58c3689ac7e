//! Store key builders for all DuoChat entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. All four keys of a room
//! share a common expiry horizon.

use duochat_core::types::RoomId;

/// Key of the room metadata hash (`connected`, `createdAt`).
pub fn room_meta(room_id: &RoomId) -> String {
    format!("meta:{room_id}")
}

/// Key of the ordered per-room message list.
pub fn room_messages(room_id: &RoomId) -> String {
    format!("messages:{room_id}")
}

/// TTL-only history tracking key. Never written, only expired.
pub fn room_history(room_id: &RoomId) -> String {
    format!("history:{room_id}")
}

/// Bare room key used for TTL tracking.
pub fn room_primary(room_id: &RoomId) -> String {
    room_id.as_str().to_string()
}
