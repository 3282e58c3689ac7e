//! Events published on a room's pub/sub channel.
//!
//! Each room has one channel, named after its room id. Events serialize
//! as an `{event, payload}` envelope so subscribers can dispatch on the
//! event name without knowing every payload shape.

use serde::{Deserialize, Serialize};

use crate::models::MessageView;

/// A realtime event scoped to one room's channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload")]
pub enum ChatEvent {
    /// A new message was appended to the room.
    #[serde(rename = "chat.message")]
    Message(MessageView),
    /// The room was destroyed and all its keys removed.
    #[serde(rename = "chat.destroy")]
    #[serde(rename_all = "camelCase")]
    Destroy {
        /// Always true; kept for wire compatibility.
        is_destroyed: bool,
    },
}

impl ChatEvent {
    /// Destroy notification payload.
    pub fn destroy() -> Self {
        Self::Destroy { is_destroyed: true }
    }

    /// The wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(_) => "chat.message",
            Self::Destroy { .. } => "chat.destroy",
        }
    }
}
