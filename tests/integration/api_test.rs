//! API endpoint integration tests
//!
//! Black-box tests driving the Agents domain router with in-memory stores
//! and the mock LLM provider.

#![allow(dead_code)]

mod agents;
mod common;
mod conversations;
mod messages;
