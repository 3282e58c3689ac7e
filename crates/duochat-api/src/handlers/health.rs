//! Health check handlers.

use axum::Json;
use axum::extract::State;

use duochat_core::traits::store::KvStore;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let store_ok = state.store.health_check().await.unwrap_or(false);

    Json(DetailedHealthResponse {
        status: if store_ok { "ok" } else { "degraded" }.to_string(),
        store: if store_ok { "connected" } else { "unreachable" }.to_string(),
    })
}
