//! Message endpoint integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
async fn test_send_message_creates_ordered_pair() {
    let app = TestApp::with_reply("R");
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "Hello"})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = parse_body(resp).await;
    assert_eq!(body["conversation_id"], conv_id.to_string());
    assert_eq!(body["user_message"]["role"], "user");
    assert_eq!(body["user_message"]["content"], "Hello");
    assert_eq!(body["user_message"]["sequence"], 1);
    assert_eq!(body["assistant_message"]["role"], "assistant");
    assert_eq!(body["assistant_message"]["content"], "R");
    assert_eq!(body["assistant_message"]["sequence"], 2);
}

#[tokio::test]
async fn test_history_after_send_is_in_creation_order() {
    let app = TestApp::with_reply("R");
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "Hello"})),
    );
    app.router().oneshot(req).await.unwrap();

    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}/history", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "Hello");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "R");
}

#[tokio::test]
async fn test_history_is_idempotent() {
    let app = TestApp::with_reply("R");
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "Hello"})),
    );
    app.router().oneshot(req).await.unwrap();

    let uri = format!("/api/conversations/{}/history", conv_id);
    let first = parse_body(
        app.router()
            .oneshot(json_request(Method::GET, &uri, None))
            .await
            .unwrap(),
    )
    .await;
    let second = parse_body(
        app.router()
            .oneshot(json_request(Method::GET, &uri, None))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_send_message_unknown_conversation_returns_404_and_persists_nothing() {
    let app = TestApp::new();
    app.seed_agent().await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", Uuid::new_v4()),
        Some(json!({"message": "Hello"})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(app.messages.is_empty());
}

#[tokio::test]
async fn test_send_empty_message_returns_400_and_persists_nothing() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": ""})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.messages.is_empty());
}

#[tokio::test]
async fn test_send_whitespace_message_returns_400_and_persists_nothing() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "   \t  "})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.messages.is_empty());
}

#[tokio::test]
async fn test_send_message_failure_keeps_user_message() {
    let app = TestApp::with_failing_llm();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "Hello"})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");

    // Documented failure policy: the user turn stays in history
    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}/history", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "Hello");
}

#[tokio::test]
async fn test_space_weather_scenario() {
    let app = TestApp::with_reply("Actividad solar moderada.");
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::POST,
        &format!("/api/conversations/{}/send_message", conv_id),
        Some(json!({"message": "¿Cómo está el clima espacial hoy?"})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}/history", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;

    assert_eq!(body["agent"], "SpaceWeather");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "¿Cómo está el clima espacial hoy?");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "Actividad solar moderada.");
}

#[tokio::test]
async fn test_multi_turn_history_grows_in_order() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    for text in ["first", "second"] {
        let req = json_request(
            Method::POST,
            &format!("/api/conversations/{}/send_message", conv_id),
            Some(json!({"message": text})),
        );
        let resp = app.router().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}/history", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    let sequences: Vec<i64> = messages
        .iter()
        .map(|m| m["sequence"].as_i64().unwrap())
        .collect();
    assert_eq!(sequences, vec![1, 2, 3, 4]);
    assert_eq!(messages[0]["content"], "first");
    assert_eq!(messages[2]["content"], "second");
}
