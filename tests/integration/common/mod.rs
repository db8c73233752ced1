//! Common test utilities and fixtures for integration tests
//!
//! Builds the Agents domain router on top of the in-memory stores and the
//! mock LLM provider, so the whole API surface can be exercised without a
//! database or network.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    Router,
};
use serde_json::Value;
use uuid::Uuid;

use aurora_agents::{
    Agent, AgentKind, AgentsState, ChatService, InMemoryAgentStore, InMemoryConversationStore,
    InMemoryMessageStore,
};
use aurora_llm::MockLlmService;

/// Test application wired to in-memory stores
pub struct TestApp {
    pub state: AgentsState,
    pub agents: Arc<InMemoryAgentStore>,
    pub messages: Arc<InMemoryMessageStore>,
}

impl TestApp {
    /// App whose provider echoes the last user message
    pub fn new() -> Self {
        Self::with_llm(MockLlmService::new())
    }

    /// App whose provider always replies with `reply`
    pub fn with_reply(reply: &str) -> Self {
        Self::with_llm(MockLlmService::with_reply(reply))
    }

    /// App whose provider fails every call
    pub fn with_failing_llm() -> Self {
        Self::with_llm(MockLlmService::failing())
    }

    fn with_llm(llm: MockLlmService) -> Self {
        let agents = Arc::new(InMemoryAgentStore::new());
        let conversations = Arc::new(InMemoryConversationStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());

        let chat = ChatService::new(
            agents.clone(),
            conversations.clone(),
            messages.clone(),
            Arc::new(llm),
        );

        Self {
            state: AgentsState::new(chat),
            agents,
            messages,
        }
    }

    /// Router under test
    pub fn router(&self) -> Router {
        aurora_agents::routes().with_state(self.state.clone())
    }

    /// Seed an active space-weather agent and return it
    pub async fn seed_agent(&self) -> Agent {
        use aurora_agents::AgentStore;

        let agent = Agent::new(
            "SpaceWeather".to_string(),
            AgentKind::Weather,
            "You are a space-weather expert".to_string(),
        )
        .unwrap();
        self.agents.create(&agent).await.unwrap()
    }

    /// Create a conversation through the API and return its ID
    pub async fn create_conversation(&self, agent_id: Uuid) -> Uuid {
        use tower::ServiceExt;

        let req = json_request(
            Method::POST,
            "/api/conversations",
            Some(serde_json::json!({"agent_id": agent_id})),
        );
        let resp = self.router().oneshot(req).await.unwrap();
        let body = parse_body(resp).await;
        body["id"].as_str().unwrap().parse().unwrap()
    }
}

/// Build a JSON request
pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(b) = body {
        builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&b).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    }
}

/// Parse response body as JSON Value
pub async fn parse_body(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
