//! # duochat-service
//!
//! Domain services for DuoChat: the room lifecycle manager and the
//! message exchange. Both sit between the HTTP layer and the store /
//! pub/sub providers and contain all room semantics.

pub mod message;
pub mod room;

pub use message::MessageService;
pub use room::{JoinOutcome, RoomService};
