use async_trait::async_trait;

use crate::domain::{ChatReply, DomainError, Message};

/// The client session's view of the chat handler: send the full transcript,
/// receive either a clarification round or a final answer.
///
/// Implemented over HTTP by `HttpChatBackend`, and directly by
/// `HandleChatUseCase` so the terminal client can run in-process.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, messages: &[Message]) -> Result<ChatReply, DomainError>;
}
