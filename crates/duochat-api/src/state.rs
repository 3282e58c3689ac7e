//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use duochat_core::config::AppConfig;
use duochat_realtime::PubSubManager;
use duochat_service::{MessageService, RoomService};
use duochat_store::StoreManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Key-value store manager (Redis or in-memory)
    pub store: Arc<StoreManager>,
    /// Pub/sub manager (Redis or in-memory)
    pub publisher: Arc<PubSubManager>,
    /// Room lifecycle service
    pub rooms: Arc<RoomService>,
    /// Message exchange service
    pub messages: Arc<MessageService>,
}

impl AppState {
    /// Assemble application state from already-constructed providers.
    pub fn new(
        config: Arc<AppConfig>,
        store: Arc<StoreManager>,
        publisher: Arc<PubSubManager>,
    ) -> Self {
        let rooms = Arc::new(RoomService::new(
            store.clone(),
            publisher.clone(),
            config.room.clone(),
        ));
        let messages = Arc::new(MessageService::new(store.clone(), publisher.clone()));

        Self {
            config,
            store,
            publisher,
            rooms,
            messages,
        }
    }
}
