//! Message exchange handlers: send and list.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::SendMessageRequest;
use crate::dto::response::MessageListResponse;
use crate::error::ApiError;
use crate::extractors::{RoomSession, ValidatedJson};
use crate::state::AppState;

/// POST /api/messages?roomId=
pub async fn send_message(
    State(state): State<AppState>,
    session: RoomSession,
    ValidatedJson(body): ValidatedJson<SendMessageRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .messages
        .send(&session.room_id, &session.token, body.sender, body.text)
        .await?;
    Ok(StatusCode::OK)
}

/// GET /api/messages?roomId=
pub async fn list_messages(
    State(state): State<AppState>,
    session: RoomSession,
) -> Result<Json<MessageListResponse>, ApiError> {
    let messages = state
        .messages
        .list(&session.room_id, &session.token)
        .await?;
    Ok(Json(MessageListResponse { messages }))
}
