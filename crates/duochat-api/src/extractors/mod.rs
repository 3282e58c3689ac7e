//! Custom Axum extractors.

pub mod auth;
pub mod validated;

pub use auth::RoomSession;
pub use validated::ValidatedJson;
