//! Repository layer for the Agents domain
//!
//! Store traits describe the persistence operations the domain needs; the
//! Postgres repositories implement them with sqlx and the in-memory stores
//! back tests and database-free local runs.

pub mod agents;
pub mod conversations;
pub mod memory;
pub mod messages;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Agent, AgentKind, Conversation, Message};
use aurora_common::Result;

pub use agents::AgentRepository;
pub use conversations::ConversationRepository;
pub use messages::MessageRepository;

/// Persistence operations for agents
#[async_trait]
pub trait AgentStore: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Agent>>;
    async fn find_by_kind(&self, kind: AgentKind) -> Result<Option<Agent>>;
    async fn list_active(&self) -> Result<Vec<Agent>>;
    async fn create(&self, agent: &Agent) -> Result<Agent>;
}

/// Persistence operations for conversations
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Conversation>>;
    async fn list(&self) -> Result<Vec<Conversation>>;
    async fn create(&self, conversation: &Conversation) -> Result<Conversation>;
    /// Bump `updated_at` after messages arrive
    async fn touch(&self, id: Uuid) -> Result<()>;
}

/// Persistence operations for messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Full history, ordered by sequence ASC
    async fn list_by_conversation(&self, conversation_id: Uuid) -> Result<Vec<Message>>;
    async fn create(&self, message: &Message) -> Result<Message>;
    /// Next sequence number for a conversation (1 for the first message)
    async fn next_sequence(&self, conversation_id: Uuid) -> Result<i32>;
}

/// Combined repository access for the Agents domain
#[derive(Clone)]
pub struct AgentsRepositories {
    pub agents: AgentRepository,
    pub conversations: ConversationRepository,
    pub messages: MessageRepository,
}

impl AgentsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            agents: AgentRepository::new(pool.clone()),
            conversations: ConversationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
        }
    }
}
