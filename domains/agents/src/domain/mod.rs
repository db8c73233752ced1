//! Domain layer for the Agents domain

pub mod entities;
pub mod service;
