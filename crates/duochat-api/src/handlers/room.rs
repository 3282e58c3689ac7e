//! Room lifecycle handlers: create, join, ttl, destroy.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use duochat_core::error::AppError;
use duochat_core::types::SessionToken;
use duochat_service::JoinOutcome;

use crate::dto::request::RoomIdQuery;
use crate::dto::response::{CreateRoomResponse, JoinResponse, TtlResponse};
use crate::error::ApiError;
use crate::extractors::RoomSession;
use crate::extractors::auth::AUTH_COOKIE;
use crate::state::AppState;

/// POST /api/room/create
pub async fn create_room(
    State(state): State<AppState>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let room_id = state.rooms.create().await?;
    Ok(Json(CreateRoomResponse { room_id }))
}

/// POST /api/room/join?roomId=
///
/// A fresh admission sets the session cookie; a rejoin with a token
/// already in the room leaves the jar untouched.
pub async fn join_room(
    State(state): State<AppState>,
    query: Result<Query<RoomIdQuery>, QueryRejection>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<JoinResponse>), ApiError> {
    let Query(query) =
        query.map_err(|_| AppError::validation("Missing or invalid roomId query parameter"))?;

    let existing = jar
        .get(AUTH_COOKIE)
        .map(|cookie| SessionToken::from_string(cookie.value()));

    let outcome = state
        .rooms
        .join(&query.room_id, existing.as_ref())
        .await?;

    let jar = match outcome {
        JoinOutcome::Joined(token) => jar.add(session_cookie(&state, token)),
        JoinOutcome::AlreadyJoined => jar,
    };

    Ok((jar, Json(JoinResponse { ok: true })))
}

/// GET /api/room/ttl?roomId=
pub async fn room_ttl(
    State(state): State<AppState>,
    session: RoomSession,
) -> Result<Json<TtlResponse>, ApiError> {
    let ttl = state.rooms.ttl(&session.room_id).await?;
    Ok(Json(TtlResponse { ttl }))
}

/// DELETE /api/room?roomId=
pub async fn destroy_room(
    State(state): State<AppState>,
    session: RoomSession,
) -> Result<StatusCode, ApiError> {
    state.rooms.destroy(&session.room_id).await?;
    Ok(StatusCode::OK)
}

/// Build the session cookie: HTTP-only, same-site strict, room-wide path.
fn session_cookie(state: &AppState, token: SessionToken) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token.into_string());
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_secure(state.config.server.secure_cookies);
    cookie
}
