//! Agents domain state

use std::sync::Arc;

use crate::domain::service::ChatService;

/// Application state for the Agents domain
#[derive(Clone)]
pub struct AgentsState {
    pub chat: Arc<ChatService>,
}

impl AgentsState {
    pub fn new(chat: ChatService) -> Self {
        Self {
            chat: Arc::new(chat),
        }
    }
}
