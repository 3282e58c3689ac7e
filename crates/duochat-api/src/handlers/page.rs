//! Room page handler.
//!
//! Sits behind the redirect guard, so by the time it runs the room is
//! known to exist. Serving the actual client is out of scope; the
//! handler answers with a minimal placeholder page.

use axum::extract::Path;
use axum::response::Html;

use duochat_core::types::RoomId;

/// GET /room/{room_id}
pub async fn room_page(Path(room_id): Path<RoomId>) -> Html<String> {
    Html(format!(
        "<!doctype html><title>DuoChat</title><h1>Room {room_id}</h1>"
    ))
}
