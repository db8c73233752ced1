//! Agent listing integration tests

use axum::http::{Method, StatusCode};
use tower::ServiceExt;

use crate::common::{json_request, parse_body, TestApp};

#[tokio::test]
async fn test_list_agents_empty() {
    let app = TestApp::new();

    let req = json_request(Method::GET, "/api/agents", None);
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_agents_returns_seeded_agent() {
    let app = TestApp::new();
    let agent = app.seed_agent().await;

    let req = json_request(Method::GET, "/api/agents", None);
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = parse_body(resp).await;
    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 1);
    assert_eq!(agents[0]["id"], agent.id.to_string());
    assert_eq!(agents[0]["name"], "SpaceWeather");
    assert_eq!(agents[0]["kind"], "weather");
    assert_eq!(agents[0]["system_prompt"], "You are a space-weather expert");
    assert_eq!(agents[0]["is_active"], true);
}

#[tokio::test]
async fn test_list_agents_hides_inactive() {
    use aurora_agents::{Agent, AgentKind, AgentStore};

    let app = TestApp::new();
    let mut agent = Agent::new(
        "Dormant".to_string(),
        AgentKind::General,
        "prompt".to_string(),
    )
    .unwrap();
    agent.is_active = false;
    app.agents.create(&agent).await.unwrap();

    let req = json_request(Method::GET, "/api/agents", None);
    let resp = app.router().oneshot(req).await.unwrap();
    let body = parse_body(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
