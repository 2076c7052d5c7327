use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::application::interfaces::{ChatBackend, CompletionClient};
use crate::application::use_cases::classify::{
    parse_classification, Classification, Verdict, CLASSIFIER_SYSTEM_PROMPT,
};
use crate::domain::{ChatReply, DomainError, Message};

/// System prompt for the answer call.
const ANSWER_SYSTEM_PROMPT: &str = "\
You are a helpful and courteous assistant. Provide answers to the user's \
questions that are as concrete and practical as possible.";

/// The clarification handler: one stateless operation per request.
///
/// Classifies the last message's ambiguity with one LLM call; when no
/// clarification is needed, answers with a second call over the full history.
/// The two calls are strictly sequential and the second runs only on the
/// no-clarification path.
pub struct HandleChatUseCase {
    client: Option<Arc<dyn CompletionClient>>,
}

impl HandleChatUseCase {
    /// `client` is `None` when no API credential is configured; every request
    /// then fails with a configuration error before any LLM call.
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, messages: &[Message]) -> Result<ChatReply, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::invalid_request("Invalid request format"));
        }

        let client = self
            .client
            .as_deref()
            .ok_or_else(|| DomainError::configuration("OpenAI API key is not configured"))?;

        // Only the most recent message is classified; earlier turns already
        // went through a round of their own.
        let subject = &messages[messages.len() - 1].content;

        let classification = self.classify(client, subject).await?;
        info!(
            needs_clarification = classification.needs_clarification,
            questions = classification.questions.len(),
            "classifier verdict"
        );

        if classification.should_clarify() {
            return Ok(ChatReply::Clarification(classification.questions));
        }

        let content = client.complete(ANSWER_SYSTEM_PROMPT, messages).await?;
        Ok(ChatReply::Answer(content))
    }

    /// Run the classifier call and shape-check its output.
    ///
    /// A transport or API failure propagates to the caller; a completion that
    /// fails the shape check degrades to "no clarification needed" so the chat
    /// stays usable when the classifier misbehaves.
    async fn classify(
        &self,
        client: &dyn CompletionClient,
        subject: &str,
    ) -> Result<Classification, DomainError> {
        let prompt = format!("Analyze the following question:\n\"{subject}\"");
        let raw = client
            .complete_json(CLASSIFIER_SYSTEM_PROMPT, &[Message::user(prompt)])
            .await?;
        debug!("raw classifier output: {raw}");

        match parse_classification(&raw) {
            Verdict::Valid(classification) => Ok(classification),
            Verdict::Invalid(reason) => {
                warn!("classifier output rejected ({reason}); answering without clarification");
                Ok(Classification::none())
            }
        }
    }
}

#[async_trait]
impl ChatBackend for HandleChatUseCase {
    async fn send(&self, messages: &[Message]) -> Result<ChatReply, DomainError> {
        self.execute(messages).await
    }
}
