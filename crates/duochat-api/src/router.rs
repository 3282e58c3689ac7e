//! Route definitions for the DuoChat HTTP API.
//!
//! All API routes are mounted under `/api`; the room page lives at
//! `/room/{room_id}` behind the redirect guard. The router receives
//! `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(room_routes())
        .merge(message_routes())
        .merge(health_routes());

    let page_routes = Router::new()
        .route("/room/{room_id}", get(handlers::page::room_page))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::room_guard::room_guard,
        ));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Room lifecycle endpoints: create, join, ttl, destroy
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/room/create", post(handlers::room::create_room))
        .route("/room/join", post(handlers::room::join_room))
        .route("/room/ttl", get(handlers::room::room_ttl))
        .route("/room", delete(handlers::room::destroy_room))
}

/// Message endpoints: send, list
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::message::send_message))
        .route("/messages", get(handlers::message::list_messages))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
