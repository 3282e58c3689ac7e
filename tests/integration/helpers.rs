//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use duochat_api::AppState;
use duochat_core::config::AppConfig;
use duochat_realtime::PubSubManager;
use duochat_realtime::memory_pubsub::MemoryPubSub;
use duochat_store::StoreManager;
use duochat_store::memory::MemoryKvStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The in-memory pub/sub, subscribable from tests
    pub pubsub: Arc<MemoryPubSub>,
}

impl TestApp {
    /// Create a new test application backed by the in-memory providers.
    pub fn new() -> Self {
        let config = Arc::new(AppConfig::default());
        let store = Arc::new(StoreManager::from_provider(Arc::new(MemoryKvStore::new())));
        let pubsub = Arc::new(MemoryPubSub::new(8));
        let publisher = Arc::new(PubSubManager::from_publisher(pubsub.clone()));

        let state = AppState::new(config, store, publisher);
        let router = duochat_api::build_router(state);

        Self { router, pubsub }
    }

    /// Make an HTTP request to the test app.
    ///
    /// `token` is sent as the `x-auth-token` cookie when present.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Cookie", format!("x-auth-token={}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookie = response
            .headers()
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
            location,
        }
    }

    /// Create a room and return its id.
    pub async fn create_room(&self) -> String {
        let response = self.request("POST", "/api/room/create", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        response
            .body
            .get("roomId")
            .and_then(|v| v.as_str())
            .expect("No roomId in create response")
            .to_string()
    }

    /// Join a room with no existing cookie and return the issued token.
    pub async fn join_room(&self, room_id: &str) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/room/join?roomId={}", room_id),
                None,
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Join failed: {:?}",
            response.body
        );
        response.auth_token().expect("No session cookie issued")
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header, if any
    pub set_cookie: Option<String>,
    /// `Location` header, if any
    pub location: Option<String>,
}

impl TestResponse {
    /// Extract the session token from the `Set-Cookie` header.
    pub fn auth_token(&self) -> Option<String> {
        let cookie = self.set_cookie.as_deref()?;
        let value = cookie.strip_prefix("x-auth-token=")?;
        Some(value.split(';').next()?.to_string())
    }
}
