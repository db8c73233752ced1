//! HTTP handlers for the Agents domain

pub mod agents;
pub mod conversations;
pub mod messages;
