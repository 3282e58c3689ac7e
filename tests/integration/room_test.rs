//! Room lifecycle integration tests.

use http::StatusCode;

use duochat_core::events::ChatEvent;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_room_returns_room_id() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/room/create", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let room_id = response.body["roomId"].as_str().unwrap();
    assert!(!room_id.is_empty());
}

#[tokio::test]
async fn test_join_missing_room_is_404() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/room/join?roomId=ghost", None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_join_without_room_id_is_structured_400() {
    let app = TestApp::new();

    let response = app.request("POST", "/api/room/join", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].as_str().unwrap().contains("roomId"));
}

#[tokio::test]
async fn test_join_scenario_two_parties_then_full() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let join_path = format!("/api/room/join?roomId={}", room_id);

    // First party joins and receives a session cookie.
    let first = app.request("POST", &join_path, None, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["ok"], true);
    let t1 = first.auth_token().expect("No session cookie issued");
    let cookie = first.set_cookie.as_deref().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/"));

    // Rejoin with the same cookie succeeds without a new token.
    let rejoin = app.request("POST", &join_path, None, Some(&t1)).await;
    assert_eq!(rejoin.status, StatusCode::OK);
    assert_eq!(rejoin.body["ok"], true);
    assert!(rejoin.set_cookie.is_none());

    // Second party gets a distinct token.
    let second = app.request("POST", &join_path, None, None).await;
    assert_eq!(second.status, StatusCode::OK);
    let t2 = second.auth_token().expect("No session cookie issued");
    assert_ne!(t1, t2);

    // A third party is turned away with a conflict.
    let third = app.request("POST", &join_path, None, None).await;
    assert_eq!(third.status, StatusCode::CONFLICT);
    assert_eq!(third.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_ttl_requires_session() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let ttl_path = format!("/api/room/ttl?roomId={}", room_id);

    let anonymous = app.request("GET", &ttl_path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let token = app.join_room(&room_id).await;
    let response = app.request("GET", &ttl_path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let ttl = response.body["ttl"].as_u64().unwrap();
    assert!(ttl > 0 && ttl <= 600, "unexpected ttl: {ttl}");
}

#[tokio::test]
async fn test_session_is_bound_to_its_room() {
    let app = TestApp::new();
    let room_a = app.create_room().await;
    let room_b = app.create_room().await;
    let token_a = app.join_room(&room_a).await;

    let response = app
        .request(
            "GET",
            &format!("/api/room/ttl?roomId={}", room_b),
            None,
            Some(&token_a),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_destroy_room_removes_it_and_notifies() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let token = app.join_room(&room_id).await;
    let mut rx = app.pubsub.subscribe(&room_id).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/room?roomId={}", room_id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    match rx.recv().await.unwrap() {
        ChatEvent::Destroy { is_destroyed } => assert!(is_destroyed),
        other => panic!("unexpected event: {other:?}"),
    }

    // The room is gone for every subsequent call.
    let rejoin = app
        .request(
            "POST",
            &format!("/api/room/join?roomId={}", room_id),
            None,
            None,
        )
        .await;
    assert_eq!(rejoin.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_destroy_requires_session() {
    let app = TestApp::new();
    let room_id = app.create_room().await;

    let response = app
        .request("DELETE", &format!("/api/room?roomId={}", room_id), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_room_page_redirects_when_room_missing() {
    let app = TestApp::new();

    let response = app.request("GET", "/room/ghost", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/?error=room-not-found"));
}

#[tokio::test]
async fn test_room_page_serves_existing_room() {
    let app = TestApp::new();
    let room_id = app.create_room().await;

    let response = app
        .request("GET", &format!("/room/{}", room_id), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let health = app.request("GET", "/api/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let detailed = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(detailed.status, StatusCode::OK);
    assert_eq!(detailed.body["store"], "connected");
}
