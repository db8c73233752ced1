//! Route definitions for the Agents domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{agents, conversations, messages};
use super::middleware::AgentsState;

/// Create agent routes
fn agent_routes() -> Router<AgentsState> {
    Router::new().route("/api/agents", get(agents::list_agents))
}

/// Create conversation routes
fn conversation_routes() -> Router<AgentsState> {
    Router::new()
        .route(
            "/api/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route(
            "/api/conversations/{id}",
            get(conversations::get_conversation),
        )
}

/// Create message routes
fn message_routes() -> Router<AgentsState> {
    Router::new()
        .route(
            "/api/conversations/{id}/send_message",
            post(messages::send_message),
        )
        .route("/api/conversations/{id}/history", get(messages::history))
}

/// Create all Agents domain API routes
pub fn routes() -> Router<AgentsState> {
    Router::new()
        .merge(agent_routes())
        .merge(conversation_routes())
        .merge(message_routes())
}
