//! Wire types for `POST /api/chat`, shared by the server controller and the
//! HTTP client backend.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::classify::DEFAULT_CATEGORY;
use crate::domain::{ChatReply, ClarificationQuestion, DomainError, Message};

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequestBody {
    pub messages: Vec<Message>,
}

/// Union of the two success shapes. Exactly one of `questions` / `content` is
/// present; absent fields are omitted from the JSON entirely.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseBody {
    pub needs_clarification: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionPayload>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub id: u32,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<ChatReply> for ChatResponseBody {
    fn from(reply: ChatReply) -> Self {
        match reply {
            ChatReply::Clarification(questions) => Self {
                needs_clarification: true,
                questions: Some(
                    questions
                        .into_iter()
                        .map(|q| QuestionPayload {
                            id: q.id,
                            question: q.question,
                            category: Some(q.category),
                        })
                        .collect(),
                ),
                content: None,
            },
            ChatReply::Answer(content) => Self {
                needs_clarification: false,
                questions: None,
                content: Some(content),
            },
        }
    }
}

impl ChatResponseBody {
    /// Interpret a response body as a [`ChatReply`], applying the surfacing
    /// invariant in one place: a clarification requires the flag AND a
    /// non-empty question list; anything else must carry content.
    pub fn into_reply(self) -> Result<ChatReply, DomainError> {
        match (self.needs_clarification, self.questions, self.content) {
            (true, Some(questions), _) if !questions.is_empty() => Ok(ChatReply::Clarification(
                questions
                    .into_iter()
                    .map(|q| ClarificationQuestion {
                        id: q.id,
                        question: q.question,
                        category: q.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                    })
                    .collect(),
            )),
            (_, _, Some(content)) => Ok(ChatReply::Answer(content)),
            _ => Err(DomainError::internal(
                "chat response carried neither questions nor content",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clarification_shape_has_no_content() {
        let reply = ChatReply::Clarification(vec![ClarificationQuestion::new(
            1,
            "Which destination?",
            "general",
        )]);
        let json = serde_json::to_value(ChatResponseBody::from(reply)).unwrap();

        assert_eq!(json["needsClarification"], true);
        assert_eq!(json["questions"][0]["id"], 1);
        assert_eq!(json["questions"][0]["category"], "general");
        assert!(json.get("content").is_none());
    }

    #[test]
    fn answer_shape_has_no_questions() {
        let json = serde_json::to_value(ChatResponseBody::from(ChatReply::Answer(
            "hello".to_string(),
        )))
        .unwrap();

        assert_eq!(json["needsClarification"], false);
        assert_eq!(json["content"], "hello");
        assert!(json.get("questions").is_none());
    }

    #[test]
    fn degenerate_clarification_falls_through_to_content() {
        // needsClarification true with zero questions must not surface a form.
        let body: ChatResponseBody = serde_json::from_str(
            r#"{"needsClarification": true, "questions": [], "content": "ok"}"#,
        )
        .unwrap();
        assert_eq!(body.into_reply().unwrap(), ChatReply::Answer("ok".to_string()));
    }

    #[test]
    fn empty_body_is_an_error() {
        let body: ChatResponseBody =
            serde_json::from_str(r#"{"needsClarification": false}"#).unwrap();
        assert!(body.into_reply().is_err());
    }
}
