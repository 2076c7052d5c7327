//! # Application Layer
//!
//! Use cases and orchestration logic coordinating domain and connector layers.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::{ChatBackend, CompletionClient};
pub use use_cases::{ChatSession, HandleChatUseCase, ViewState};
