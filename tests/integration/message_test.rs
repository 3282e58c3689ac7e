//! Message exchange integration tests.

use http::StatusCode;
use serde_json::json;

use duochat_core::events::ChatEvent;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_send_requires_session() {
    let app = TestApp::new();
    let room_id = app.create_room().await;

    let response = app
        .request(
            "POST",
            &format!("/api/messages?roomId={}", room_id),
            Some(json!({"sender": "alice", "text": "hi"})),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_send_to_expired_room_is_401() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/messages?roomId=ghost",
            Some(json!({"sender": "alice", "text": "hi"})),
            Some("stale-token"),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_send_validates_body() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let token = app.join_room(&room_id).await;
    let path = format!("/api/messages?roomId={}", room_id);

    let empty_text = app
        .request(
            "POST",
            &path,
            Some(json!({"sender": "alice", "text": ""})),
            Some(&token),
        )
        .await;
    assert_eq!(empty_text.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty_text.body["error"], "VALIDATION_ERROR");

    let long_text = app
        .request(
            "POST",
            &path,
            Some(json!({"sender": "alice", "text": "x".repeat(1001)})),
            Some(&token),
        )
        .await;
    assert_eq!(long_text.status, StatusCode::BAD_REQUEST);

    let long_sender = app
        .request(
            "POST",
            &path,
            Some(json!({"sender": "x".repeat(101), "text": "hi"})),
            Some(&token),
        )
        .await;
    assert_eq!(long_sender.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_and_list_preserve_order() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let token = app.join_room(&room_id).await;
    let path = format!("/api/messages?roomId={}", room_id);

    for text in ["first", "second", "third"] {
        let response = app
            .request(
                "POST",
                &path,
                Some(json!({"sender": "alice", "text": text})),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let listed = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(listed.status, StatusCode::OK);

    let messages = listed.body["messages"].as_array().unwrap();
    let texts: Vec<&str> = messages
        .iter()
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(messages[0]["roomId"].as_str().unwrap(), room_id);
    assert!(messages[0]["timestamp"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_listing_redacts_other_partys_tokens() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let alice = app.join_room(&room_id).await;
    let bob = app.join_room(&room_id).await;
    let path = format!("/api/messages?roomId={}", room_id);

    app.request(
        "POST",
        &path,
        Some(json!({"sender": "alice", "text": "hi"})),
        Some(&alice),
    )
    .await;
    app.request(
        "POST",
        &path,
        Some(json!({"sender": "bob", "text": "hey"})),
        Some(&bob),
    )
    .await;

    let seen_by_alice = app.request("GET", &path, None, Some(&alice)).await;
    let messages = seen_by_alice.body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["token"].as_str().unwrap(), alice);
    // Redacted messages omit the field entirely rather than carrying null.
    assert!(messages[1].get("token").is_none());

    let seen_by_bob = app.request("GET", &path, None, Some(&bob)).await;
    let messages = seen_by_bob.body["messages"].as_array().unwrap();
    assert!(messages[0].get("token").is_none());
    assert_eq!(messages[1]["token"].as_str().unwrap(), bob);
}

#[tokio::test]
async fn test_send_publishes_token_free_event() {
    let app = TestApp::new();
    let room_id = app.create_room().await;
    let token = app.join_room(&room_id).await;
    let mut rx = app.pubsub.subscribe(&room_id).await;

    let response = app
        .request(
            "POST",
            &format!("/api/messages?roomId={}", room_id),
            Some(json!({"sender": "alice", "text": "hi"})),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    match rx.recv().await.unwrap() {
        ChatEvent::Message(view) => {
            assert_eq!(view.text, "hi");
            assert_eq!(view.sender, "alice");
            assert_eq!(view.token, None);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_requires_session() {
    let app = TestApp::new();
    let room_id = app.create_room().await;

    let response = app
        .request(
            "GET",
            &format!("/api/messages?roomId={}", room_id),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
