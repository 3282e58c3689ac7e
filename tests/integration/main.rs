//! Integration test entry point.

mod helpers;
mod message_test;
mod room_test;
