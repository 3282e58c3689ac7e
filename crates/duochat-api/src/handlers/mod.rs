//! HTTP request handlers, one module per route group.

pub mod health;
pub mod message;
pub mod page;
pub mod room;
