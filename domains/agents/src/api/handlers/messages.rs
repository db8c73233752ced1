//! Message API handlers

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
use crate::domain::entities::MessageRole;
use aurora_common::{Result, ValidatedJson};

/// Request for sending a message
#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Message content
    #[validate(length(min = 1))]
    pub message: String,
}

/// Message response DTO
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub model: Option<String>,
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub sequence: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::domain::entities::Message> for MessageResponse {
    fn from(m: crate::domain::entities::Message) -> Self {
        Self {
            id: m.id,
            conversation_id: m.conversation_id,
            role: m.role,
            content: m.content,
            model: m.model,
            input_tokens: m.input_tokens,
            output_tokens: m.output_tokens,
            sequence: m.sequence,
            created_at: m.created_at,
        }
    }
}

/// Response for send message (includes both user and assistant messages)
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub conversation_id: Uuid,
    pub user_message: MessageResponse,
    pub assistant_message: MessageResponse,
}

/// Response for conversation history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub conversation_id: Uuid,
    pub agent: String,
    pub messages: Vec<MessageResponse>,
}

/// Send a message to a conversation and return the persisted exchange
pub async fn send_message(
    State(state): State<AgentsState>,
    Path(conversation_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>)> {
    let pair = state.chat.send_message(conversation_id, req.message).await?;

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            conversation_id,
            user_message: pair.user_message.into(),
            assistant_message: pair.assistant_message.into(),
        }),
    ))
}

/// Get the full ordered history of a conversation
pub async fn history(
    State(state): State<AgentsState>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>> {
    let history = state.chat.history(conversation_id).await?;

    Ok(Json(HistoryResponse {
        conversation_id,
        agent: history.agent.name,
        messages: history.messages.into_iter().map(Into::into).collect(),
    }))
}
