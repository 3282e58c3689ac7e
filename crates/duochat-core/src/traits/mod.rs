//! Trait seams between the service layer and its external collaborators.

pub mod publisher;
pub mod store;

pub use publisher::EventPublisher;
pub use store::{KvStore, MemberAdd};
