//! Conversation endpoint integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
async fn test_create_conversation_returns_201() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;

    let req = json_request(
        Method::POST,
        "/api/conversations",
        Some(json!({"agent_id": agent.id})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = parse_body(resp).await;
    assert_eq!(body["agent_id"], agent.id.to_string());
    assert!(body["id"].as_str().is_some());
    assert!(body["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_create_conversation_default_title() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;

    let req = json_request(
        Method::POST,
        "/api/conversations",
        Some(json!({"agent_id": agent.id})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;
    assert_eq!(body["title"], "SpaceWeather Consultation");
}

#[tokio::test]
async fn test_create_conversation_custom_title() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;

    let req = json_request(
        Method::POST,
        "/api/conversations",
        Some(json!({"agent_id": agent.id, "title": "Solar flare questions"})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;
    assert_eq!(body["title"], "Solar flare questions");
}

#[tokio::test]
async fn test_create_conversation_unknown_agent_returns_404() {
    let app = TestApp::new();

    let req = json_request(
        Method::POST,
        "/api/conversations",
        Some(json!({"agent_id": Uuid::new_v4()})),
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = parse_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_conversation_missing_agent_id_returns_400() {
    let app = TestApp::new();

    let req = json_request(Method::POST, "/api/conversations", Some(json!({})));
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_new_conversation_has_empty_history() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}/history", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["conversation_id"], conv_id.to_string());
    assert_eq!(body["agent"], "SpaceWeather");
    assert_eq!(body["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_conversation() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    let conv_id = app.create_conversation(agent.id).await;

    let req = json_request(
        Method::GET,
        &format!("/api/conversations/{}", conv_id),
        None,
    );
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body["id"], conv_id.to_string());
}

#[tokio::test]
async fn test_list_conversations() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;
    app.create_conversation(agent.id).await;
    app.create_conversation(agent.id).await;

    let req = json_request(Method::GET, "/api/conversations", None);
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
