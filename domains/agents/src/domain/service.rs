//! Chat orchestration service
//!
//! Turns a single user message into a persisted exchange: persist the user
//! turn, send the full ordered history to the LLM provider, persist the
//! assistant turn, return both.
//!
//! Failure policy: the user message stays persisted when the provider call
//! fails, so the turn remains visible in history and the caller can resend.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{Agent, AgentKind, Conversation, Message, MessageRole};
use crate::repository::{AgentStore, ConversationStore, MessageStore};
use aurora_common::{Error, Result};
use aurora_llm::{CompletionRequest, LlmMessage, LlmRole, LlmService};

/// System prompt for the built-in space-weather agent
const WEATHER_SYSTEM_PROMPT: &str = "\
You are an expert assistant in meteorology and space weather.

Your specialty includes terrestrial weather forecasts, space weather and solar \
activity, geomagnetic storms and their impact, space radiation, effects of \
space weather on satellites and communications, and atmospheric phenomena \
related to space events.

Provide accurate, scientific, and understandable information. When you lack \
real-time data, say so clearly and offer general background on the topic.

Always answer in the language you are spoken to.";

/// The persisted pair produced by one send-message turn
#[derive(Debug, Clone)]
pub struct MessagePair {
    pub user_message: Message,
    pub assistant_message: Message,
}

/// A conversation together with its agent and ordered messages
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    pub conversation: Conversation,
    pub agent: Agent,
    pub messages: Vec<Message>,
}

/// Orchestrates conversations between users and LLM-backed agents
#[derive(Clone)]
pub struct ChatService {
    agents: Arc<dyn AgentStore>,
    conversations: Arc<dyn ConversationStore>,
    messages: Arc<dyn MessageStore>,
    llm: Arc<dyn LlmService>,
}

impl ChatService {
    pub fn new(
        agents: Arc<dyn AgentStore>,
        conversations: Arc<dyn ConversationStore>,
        messages: Arc<dyn MessageStore>,
        llm: Arc<dyn LlmService>,
    ) -> Self {
        Self {
            agents,
            conversations,
            messages,
            llm,
        }
    }

    /// List agents available for conversation
    pub async fn list_agents(&self) -> Result<Vec<Agent>> {
        self.agents.list_active().await
    }

    /// List all conversations, most recently active first
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>> {
        self.conversations.list().await
    }

    /// Get a conversation by ID
    pub async fn get_conversation(&self, id: Uuid) -> Result<Conversation> {
        self.conversations
            .find(id)
            .await?
            .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))
    }

    /// Create a new conversation with an agent
    pub async fn create_conversation(
        &self,
        agent_id: Uuid,
        title: Option<String>,
    ) -> Result<Conversation> {
        let agent = self
            .agents
            .find(agent_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or_else(|| Error::NotFound("Agent not found".to_string()))?;

        let title = title.or_else(|| Some(format!("{} Consultation", agent.name)));
        let conversation = Conversation::new(agent.id, title)?;
        self.conversations.create(&conversation).await
    }

    /// Full ordered history of a conversation
    pub async fn history(&self, conversation_id: Uuid) -> Result<ConversationHistory> {
        let conversation = self.get_conversation(conversation_id).await?;
        let agent = self
            .agents
            .find(conversation.agent_id)
            .await?
            .ok_or_else(|| Error::NotFound("Agent not found".to_string()))?;
        let messages = self.messages.list_by_conversation(conversation_id).await?;

        Ok(ConversationHistory {
            conversation,
            agent,
            messages,
        })
    }

    /// Send a user message and return the persisted (user, assistant) pair
    pub async fn send_message(&self, conversation_id: Uuid, content: String) -> Result<MessagePair> {
        let conversation = self.get_conversation(conversation_id).await?;
        let agent = self
            .agents
            .find(conversation.agent_id)
            .await?
            .ok_or_else(|| Error::NotFound("Agent not found".to_string()))?;

        // Validates non-empty content before anything is persisted
        let sequence = self.messages.next_sequence(conversation_id).await?;
        let user_message = Message::new_user(conversation_id, content, sequence)?;
        let user_message = self.messages.create(&user_message).await?;

        // Full ordered history including the just-added message, never a subset
        let history = self.messages.list_by_conversation(conversation_id).await?;
        let llm_messages: Vec<LlmMessage> = history
            .iter()
            .map(|m| LlmMessage {
                role: match m.role {
                    MessageRole::User => LlmRole::User,
                    MessageRole::Assistant => LlmRole::Assistant,
                },
                content: m.content.clone(),
            })
            .collect();

        let request = CompletionRequest {
            model: String::new(),
            system_prompt: Some(agent.system_prompt.clone()),
            messages: llm_messages,
            max_tokens: None,
        };

        tracing::debug!(
            conversation_id = %conversation_id,
            agent = %agent.name,
            turns = history.len(),
            "Requesting completion"
        );

        // No retry: a failed provider call surfaces immediately and the
        // user message above remains persisted.
        let completion = self
            .llm
            .complete(request)
            .await
            .map_err(|e| Error::Upstream(format!("LLM provider error: {}", e)))?;

        let assistant_message = Message::new_assistant(
            conversation_id,
            completion.content,
            sequence + 1,
            completion.model,
            completion.input_tokens,
            completion.output_tokens,
        )?;
        let assistant_message = self.messages.create(&assistant_message).await?;

        self.conversations.touch(conversation_id).await?;

        Ok(MessagePair {
            user_message,
            assistant_message,
        })
    }
}

/// Get or create the built-in space-weather agent
///
/// Runs once at startup so a fresh deployment has a usable agent without
/// administrative setup.
pub async fn ensure_default_agent(agents: &dyn AgentStore) -> Result<Agent> {
    if let Some(agent) = agents.find_by_kind(AgentKind::Weather).await? {
        return Ok(agent);
    }

    let agent = Agent::new(
        "Weather & Space Climate Agent".to_string(),
        AgentKind::Weather,
        WEATHER_SYSTEM_PROMPT.to_string(),
    )?;

    tracing::info!(agent = %agent.name, "Seeding default agent");
    agents.create(&agent).await
}
