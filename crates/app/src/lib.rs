//! Aurora application composition root
//!
//! Wires the Postgres repositories, the configured LLM provider, and the
//! Agents domain router into a single application.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use aurora_agents::{ensure_default_agent, AgentsRepositories, AgentsState, ChatService};
use aurora_common::Config;
use aurora_llm::{LlmConfig, LlmServiceFactory};

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    // Select the LLM provider once at startup. A missing API key is not an
    // error here: it surfaces as an upstream error on the first call.
    let llm_config = LlmConfig::from_app_config(&config);
    let llm = LlmServiceFactory::create(&config.llm_provider, llm_config)
        .map_err(|e| anyhow::anyhow!("Failed to create LLM service: {}", e))?;

    let repos = AgentsRepositories::new(pool);

    // A fresh database gets the built-in space-weather agent
    ensure_default_agent(&repos.agents)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed default agent: {}", e))?;

    let chat = ChatService::new(
        Arc::new(repos.agents.clone()),
        Arc::new(repos.conversations.clone()),
        Arc::new(repos.messages.clone()),
        llm,
    );

    let state = AgentsState::new(chat);

    // Build router — compose the domain router with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Aurora API v0.1.0" }))
        .merge(aurora_agents::routes().with_state(state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
