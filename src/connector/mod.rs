//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM completion clients (OpenAI API, canned mock)
//! - HTTP API (axum router, chat controller, dependency container)
//! - Client transport and terminal front end

pub mod adapter;
pub mod api;
pub mod client;
pub mod protocol;

pub use adapter::{MockCompletion, OpenAiClient};
pub use api::{router, Container, ContainerConfig};
pub use client::{HttpChatBackend, TerminalChat};
