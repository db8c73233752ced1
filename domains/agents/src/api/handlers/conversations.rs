//! Conversation management API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AgentsState;
use aurora_common::{Result, ValidatedJson};

/// Request for creating a conversation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationRequest {
    /// Agent to converse with
    pub agent_id: Uuid,

    /// Optional conversation title
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

/// Conversation response DTO
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::domain::entities::Conversation> for ConversationResponse {
    fn from(c: crate::domain::entities::Conversation) -> Self {
        Self {
            id: c.id,
            agent_id: c.agent_id,
            title: c.title,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Create a new conversation with an agent
pub async fn create_conversation(
    State(state): State<AgentsState>,
    ValidatedJson(req): ValidatedJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ConversationResponse>)> {
    let created = state
        .chat
        .create_conversation(req.agent_id, req.title)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List conversations
pub async fn list_conversations(
    State(state): State<AgentsState>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let convs = state.chat.list_conversations().await?;
    let responses: Vec<ConversationResponse> = convs.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Get a single conversation by ID
pub async fn get_conversation(
    State(state): State<AgentsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>> {
    let conv = state.chat.get_conversation(id).await?;
    Ok(Json(conv.into()))
}
