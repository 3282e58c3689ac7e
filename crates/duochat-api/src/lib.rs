//! # duochat-api
//!
//! The HTTP layer of DuoChat: router, handlers, DTOs, extractors, and
//! middleware. Domain logic lives in `duochat-service`; this crate only
//! translates between HTTP and the services.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
