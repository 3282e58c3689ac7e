//! # duochat-core
//!
//! Core crate for DuoChat. Contains the configuration schemas, typed
//! identifiers, domain models, pub/sub event types, the store and
//! publisher traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DuoChat crates.

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
