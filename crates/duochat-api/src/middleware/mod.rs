//! HTTP middleware.

pub mod logging;
pub mod room_guard;
