//! In-memory store implementations
//!
//! Back the test suites and database-free local runs. Behavior mirrors the
//! Postgres repositories, including the Conflict on a duplicate
//! (conversation_id, sequence) pair.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::{Agent, AgentKind, Conversation, Message};
use crate::repository::{AgentStore, ConversationStore, MessageStore};
use aurora_common::{Error, Result};

/// In-memory agent store
#[derive(Clone, Default)]
pub struct InMemoryAgentStore {
    agents: Arc<Mutex<Vec<Agent>>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn find(&self, id: Uuid) -> Result<Option<Agent>> {
        let agents = self.agents.lock().unwrap();
        Ok(agents.iter().find(|a| a.id == id).cloned())
    }

    async fn find_by_kind(&self, kind: AgentKind) -> Result<Option<Agent>> {
        let agents = self.agents.lock().unwrap();
        Ok(agents.iter().find(|a| a.kind == kind).cloned())
    }

    async fn list_active(&self) -> Result<Vec<Agent>> {
        let agents = self.agents.lock().unwrap();
        let mut active: Vec<Agent> = agents.iter().filter(|a| a.is_active).cloned().collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn create(&self, agent: &Agent) -> Result<Agent> {
        let mut agents = self.agents.lock().unwrap();
        agents.push(agent.clone());
        Ok(agent.clone())
    }
}

/// In-memory conversation store
#[derive(Clone, Default)]
pub struct InMemoryConversationStore {
    conversations: Arc<Mutex<Vec<Conversation>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn find(&self, id: Uuid) -> Result<Option<Conversation>> {
        let convs = self.conversations.lock().unwrap();
        Ok(convs.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Conversation>> {
        let convs = self.conversations.lock().unwrap();
        let mut all = convs.clone();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(all)
    }

    async fn create(&self, conversation: &Conversation) -> Result<Conversation> {
        let mut convs = self.conversations.lock().unwrap();
        convs.push(conversation.clone());
        Ok(conversation.clone())
    }

    async fn touch(&self, id: Uuid) -> Result<()> {
        let mut convs = self.conversations.lock().unwrap();
        if let Some(conv) = convs.iter_mut().find(|c| c.id == id) {
            conv.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// In-memory message store
#[derive(Clone, Default)]
pub struct InMemoryMessageStore {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored messages, across all conversations
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn list_by_conversation(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let messages = self.messages.lock().unwrap();
        let mut history: Vec<Message> = messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .cloned()
            .collect();
        history.sort_by_key(|m| m.sequence);
        Ok(history)
    }

    async fn create(&self, message: &Message) -> Result<Message> {
        let mut messages = self.messages.lock().unwrap();
        let taken = messages
            .iter()
            .any(|m| m.conversation_id == message.conversation_id && m.sequence == message.sequence);
        if taken {
            return Err(Error::Conflict(
                "Concurrent write to conversation, retry the message".to_string(),
            ));
        }
        messages.push(message.clone());
        Ok(message.clone())
    }

    async fn next_sequence(&self, conversation_id: Uuid) -> Result<i32> {
        let messages = self.messages.lock().unwrap();
        let max = messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .map(|m| m.sequence)
            .max()
            .unwrap_or(0);
        Ok(max + 1)
    }
}
