//! API layer for the Agents domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::AgentsState;
pub use routes::routes;
