//! `RoomSession` extractor — reads the room id and the session cookie,
//! checks membership, and injects the verified pair into handlers.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use duochat_core::error::AppError;
use duochat_core::models::{META_FIELD_CONNECTED, RoomMeta};
use duochat_core::traits::store::KvStore;
use duochat_core::types::{RoomId, SessionToken};
use duochat_store::keys;

use crate::dto::request::RoomIdQuery;
use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the session token.
pub const AUTH_COOKIE: &str = "x-auth-token";

/// A verified room membership: the requested room and the caller's token.
///
/// Extraction fails with `Unauthorized` when the cookie is absent, the
/// room's metadata key is gone, or the token is not in the room's
/// membership list. The check is stateless; nothing is cached between
/// requests.
#[derive(Debug, Clone)]
pub struct RoomSession {
    /// The room the request targets.
    pub room_id: RoomId,
    /// The caller's session token.
    pub token: SessionToken,
}

impl FromRequestParts<AppState> for RoomSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<RoomIdQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Missing or invalid roomId query parameter"))?;

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(AUTH_COOKIE)
            .map(|cookie| SessionToken::from_string(cookie.value()))
            .ok_or_else(|| AppError::unauthorized("Missing session cookie"))?;

        let raw = state
            .store
            .hash_get(&keys::room_meta(&query.room_id), META_FIELD_CONNECTED)
            .await?
            .ok_or_else(|| AppError::unauthorized("Room not found or expired"))?;

        let connected = RoomMeta::parse_connected(&raw)?;
        if !connected.contains(&token) {
            return Err(ApiError(AppError::unauthorized(
                "Session is not a member of this room",
            )));
        }

        Ok(Self {
            room_id: query.room_id,
            token,
        })
    }
}
