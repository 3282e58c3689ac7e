//! Redirect guard for the room page route.

use axum::extract::{Path, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use duochat_core::traits::store::KvStore;
use duochat_core::types::RoomId;
use duochat_store::keys;

use crate::state::AppState;

/// Where visitors of dead rooms are sent.
const NOT_FOUND_REDIRECT: &str = "/?error=room-not-found";

/// Guards `GET /room/{room_id}`: visitors of rooms whose metadata key no
/// longer exists are redirected to the landing page instead of seeing a
/// dead room. This is an existence check only; membership is enforced
/// separately on the API routes.
pub async fn room_guard(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    request: Request,
    next: Next,
) -> Response {
    match state.store.exists(&keys::room_meta(&room_id)).await {
        Ok(true) => next.run(request).await,
        Ok(false) => {
            debug!(room_id = %room_id, "Room page requested for missing room");
            Redirect::to(NOT_FOUND_REDIRECT).into_response()
        }
        Err(_) => Redirect::to(NOT_FOUND_REDIRECT).into_response(),
    }
}
