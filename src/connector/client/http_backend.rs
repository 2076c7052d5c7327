use async_trait::async_trait;

use crate::application::ChatBackend;
use crate::connector::protocol::{ChatRequestBody, ChatResponseBody, ErrorBody};
use crate::domain::{ChatReply, DomainError, Message};

/// [`ChatBackend`] over HTTP: posts the transcript to a running clarichat
/// server and decodes the reply.
pub struct HttpChatBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpChatBackend {
    /// `base_url` points at the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            url: format!("{}/api/chat", base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, messages: &[Message]) -> Result<ChatReply, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequestBody {
                messages: messages.to_vec(),
            })
            .send()
            .await
            .map_err(|e| DomainError::upstream(None, format!("chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_error(status.as_u16(), &body));
        }

        let body: ChatResponseBody = response.json().await.map_err(|e| {
            DomainError::upstream(None, format!("failed to parse chat response: {e}"))
        })?;
        body.into_reply()
    }
}

/// Map a non-2xx response to an upstream error, keeping the server's error
/// message and details when the body decodes.
fn decode_error(status: u16, body: &str) -> DomainError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error,
            details: Some(details),
        }) => DomainError::upstream_with_details(Some(status), error, details),
        Ok(ErrorBody { error, .. }) => DomainError::upstream(Some(status), error),
        Err(_) => DomainError::upstream(Some(status), format!("server returned {status}")),
    }
}
