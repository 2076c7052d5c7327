use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{DomainError, Message};

/// Canned [`CompletionClient`] for offline runs and tests.
///
/// The classifier call always reports "no clarification needed"; the answer
/// call echoes the last user message.
pub struct MockCompletion;

impl MockCompletion {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, _system: &str, messages: &[Message]) -> Result<String, DomainError> {
        let last = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        debug!("mock completion answering {} messages", messages.len());
        Ok(format!("[mock] You said: {last}"))
    }

    async fn complete_json(
        &self,
        _system: &str,
        _messages: &[Message],
    ) -> Result<String, DomainError> {
        Ok(r#"{"needs_clarification": false, "questions": []}"#.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::classify::{parse_classification, Verdict};

    #[tokio::test]
    async fn mock_classifier_output_is_well_formed() {
        let client = MockCompletion::new();
        let raw = client.complete_json("", &[]).await.unwrap();
        match parse_classification(&raw) {
            Verdict::Valid(c) => assert!(!c.needs_clarification),
            Verdict::Invalid(reason) => panic!("mock output rejected: {reason}"),
        }
    }

    #[tokio::test]
    async fn mock_answer_echoes_last_message() {
        let client = MockCompletion::new();
        let reply = client
            .complete("", &[Message::user("ping")])
            .await
            .unwrap();
        assert!(reply.contains("ping"));
    }
}
