//! Domain entities for the Agents domain
//!
//! Agents pair a name with a system prompt; conversations belong to one agent;
//! messages form the ordered turns of a conversation. Each entity validates its
//! own construction invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aurora_common::{Error, Result};

/// Agent specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "agent_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Weather,
    #[default]
    General,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Weather => write!(f, "weather"),
            AgentKind::General => write!(f, "general"),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "message_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Maximum agent name length (varchar(100))
const MAX_NAME_LENGTH: usize = 100;

/// Maximum conversation title length (varchar(200))
const MAX_TITLE_LENGTH: usize = 200;

/// Maximum system prompt length (CHECK length <= 10000)
const MAX_SYSTEM_PROMPT_LENGTH: usize = 10000;

/// Agent entity
///
/// Created administratively, immutable during normal operation. The chat
/// service reads the system prompt to seed every provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub kind: AgentKind,
    pub system_prompt: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent
    pub fn new(name: String, kind: AgentKind, system_prompt: String) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Agent name is required".to_string()));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::Validation(format!(
                "Agent name must be at most {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if system_prompt.trim().is_empty() {
            return Err(Error::Validation("System prompt is required".to_string()));
        }
        if system_prompt.len() > MAX_SYSTEM_PROMPT_LENGTH {
            return Err(Error::Validation(format!(
                "System prompt must be at most {} characters",
                MAX_SYSTEM_PROMPT_LENGTH
            )));
        }

        let now = Utc::now();
        Ok(Agent {
            id: Uuid::new_v4(),
            name,
            kind,
            system_prompt,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Conversation entity
///
/// Never mutated after creation except for `updated_at`, touched when
/// messages arrive. Never deleted by the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Conversation {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new conversation for an agent
    pub fn new(agent_id: Uuid, title: Option<String>) -> Result<Self> {
        if let Some(ref t) = title {
            if t.len() > MAX_TITLE_LENGTH {
                return Err(Error::Validation(format!(
                    "Title must be at most {} characters",
                    MAX_TITLE_LENGTH
                )));
            }
        }

        let now = Utc::now();
        Ok(Conversation {
            id: Uuid::new_v4(),
            agent_id,
            title,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Message entity
///
/// Immutable once created. `sequence` starts at 1 and is strictly increasing
/// within a conversation; history is always read in sequence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
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

impl Message {
    /// Create a new user message
    pub fn new_user(conversation_id: Uuid, content: String, sequence: i32) -> Result<Self> {
        Self::validate_content(&content)?;
        Self::validate_sequence(sequence)?;

        Ok(Message {
            id: Uuid::new_v4(),
            conversation_id,
            role: MessageRole::User,
            content,
            model: None,
            input_tokens: None,
            output_tokens: None,
            sequence,
            created_at: Utc::now(),
        })
    }

    /// Create a new assistant message
    pub fn new_assistant(
        conversation_id: Uuid,
        content: String,
        sequence: i32,
        model: String,
        input_tokens: i32,
        output_tokens: i32,
    ) -> Result<Self> {
        Self::validate_content(&content)?;
        Self::validate_sequence(sequence)?;

        Ok(Message {
            id: Uuid::new_v4(),
            conversation_id,
            role: MessageRole::Assistant,
            content,
            model: Some(model),
            input_tokens: Some(input_tokens),
            output_tokens: Some(output_tokens),
            sequence,
            created_at: Utc::now(),
        })
    }

    /// Validate message content (CHECK (length(trim(content)) > 0))
    fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty or whitespace-only".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate sequence (CHECK (sequence >= 1))
    fn validate_sequence(sequence: i32) -> Result<()> {
        if sequence < 1 {
            return Err(Error::Validation(
                "Message sequence must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
