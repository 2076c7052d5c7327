use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::CompletionClient;
use crate::domain::{DomainError, Message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
const TEMPERATURE: f32 = 0.7;
/// Token cap for the classifier call; the answer call is left uncapped.
const CLASSIFIER_MAX_TOKENS: u32 = 500;

/// OpenAI chat-completions request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI chat completions API (and compatible endpoints).
///
/// Implements [`CompletionClient`] so `HandleChatUseCase` stays decoupled from
/// transport and serialization details. No request timeout is set; the
/// transport's own behavior applies.
///
/// Configuration comes from the environment:
///
/// ```text
/// OPENAI_API_KEY=sk-...
/// OPENAI_MODEL=gpt-4o
/// OPENAI_BASE_URL=https://api.openai.com
/// ```
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Convenience constructor that reads configuration from the environment:
    /// - `OPENAI_API_KEY`  — required; returns `None` when absent
    /// - `OPENAI_MODEL`    — optional; defaults to `gpt-4o` with a warning
    /// - `OPENAI_BASE_URL` — optional; any OpenAI-compatible server
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| {
            warn!("OPENAI_MODEL is not set, using default: {DEFAULT_MODEL}");
            DEFAULT_MODEL.to_string()
        });
        let base = std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(key, model, base))
    }

    async fn request(
        &self,
        system: &str,
        messages: &[Message],
        json_object: bool,
        max_tokens: Option<u32>,
    ) -> Result<String, DomainError> {
        let mut api_messages = Vec::with_capacity(messages.len() + 1);
        api_messages.push(ApiMessage {
            role: "system",
            content: system,
        });
        api_messages.extend(messages.iter().map(|m| ApiMessage {
            role: m.role.as_str(),
            content: &m.content,
        }));

        let request = ApiRequest {
            model: &self.model,
            messages: api_messages,
            temperature: TEMPERATURE,
            max_tokens,
            response_format: json_object.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::upstream(None, format!("OpenAI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAI API returned {status}: {body}");
            let message = format!("OpenAI API returned {status}");
            return Err(if body.is_empty() {
                DomainError::upstream(Some(status.as_u16()), message)
            } else {
                DomainError::upstream_with_details(Some(status.as_u16()), message, body)
            });
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(None, format!("failed to parse OpenAI response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::upstream(None, "OpenAI response contained no completion"))
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<String, DomainError> {
        self.request(system, messages, false, None).await
    }

    async fn complete_json(
        &self,
        system: &str,
        messages: &[Message],
    ) -> Result<String, DomainError> {
        self.request(system, messages, true, Some(CLASSIFIER_MAX_TOKENS))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = OpenAiClient::new("key", "gpt-4o", "http://localhost:1234/");
        assert_eq!(client.url, "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn json_mode_adds_response_format() {
        let request = ApiRequest {
            model: "gpt-4o",
            messages: vec![],
            temperature: TEMPERATURE,
            max_tokens: Some(500),
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn prose_mode_omits_optional_fields() {
        let request = ApiRequest {
            model: "gpt-4o",
            messages: vec![],
            temperature: TEMPERATURE,
            max_tokens: None,
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());
        assert!(json.get("max_tokens").is_none());
    }
}
