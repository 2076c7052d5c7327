use async_trait::async_trait;

use crate::domain::{DomainError, Message};

/// An interface for sending chat-style prompts to an LLM and receiving text
/// responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Consumers (e.g. `HandleChatUseCase`) remain decoupled from any
/// particular provider or HTTP client library.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a `system` instruction followed by the message history and return
    /// the assistant's response text.
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<String, DomainError>;

    /// Like [`CompletionClient::complete`], but asks the provider to constrain
    /// the completion to a single JSON object. Used for the classifier call.
    async fn complete_json(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<String, DomainError>;
}
