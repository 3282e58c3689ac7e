//! # duochat-store
//!
//! Key-value store providers for DuoChat. Supports two modes:
//!
//! - **memory**: In-process store using [dashmap](https://crates.io/crates/dashmap)
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::StoreManager;
