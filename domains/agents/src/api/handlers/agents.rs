//! Agent listing API handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::api::middleware::AgentsState;
use crate::domain::entities::AgentKind;
use aurora_common::Result;

/// Agent response DTO
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub id: Uuid,
    pub name: String,
    pub kind: AgentKind,
    pub system_prompt: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::domain::entities::Agent> for AgentResponse {
    fn from(a: crate::domain::entities::Agent) -> Self {
        Self {
            id: a.id,
            name: a.name,
            kind: a.kind,
            system_prompt: a.system_prompt,
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

/// List available agents
pub async fn list_agents(State(state): State<AgentsState>) -> Result<Json<Vec<AgentResponse>>> {
    let agents = state.chat.list_agents().await?;
    let responses: Vec<AgentResponse> = agents.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}
