//! Agents domain: agent presets, LLM chat threads, messages

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Agent, AgentKind, Conversation, Message, MessageRole};
pub use domain::service::{ensure_default_agent, ChatService, ConversationHistory, MessagePair};

// Re-export repository types
pub use repository::{
    AgentRepository, AgentStore, AgentsRepositories, ConversationRepository, ConversationStore,
    MessageRepository, MessageStore,
};
pub use repository::memory::{InMemoryAgentStore, InMemoryConversationStore, InMemoryMessageStore};

// Re-export API types
pub use api::routes;
pub use api::AgentsState;
