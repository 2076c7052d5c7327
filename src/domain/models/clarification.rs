use serde::{Deserialize, Serialize};

/// A follow-up question produced by the classifier, after normalization.
///
/// `id` is stable within one clarification round; `category` is always
/// populated (the handler defaults it when the model omits one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationQuestion {
    pub id: u32,
    pub question: String,
    pub category: String,
}

impl ClarificationQuestion {
    pub fn new(id: u32, question: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            category: category.into(),
        }
    }
}

/// A clarification question as held by the client session while the user
/// fills in the form. Created from a [`ClarificationQuestion`] with an empty
/// answer, mutated via `set_answer`, and consumed on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuestion {
    pub id: u32,
    pub question: String,
    pub category: Option<String>,
    pub answer: String,
}

impl PendingQuestion {
    pub fn is_answered(&self) -> bool {
        !self.answer.trim().is_empty()
    }
}

/// Outcome of one handler invocation. Exactly one of the two shapes; a
/// `Clarification` always carries at least one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatReply {
    Clarification(Vec<ClarificationQuestion>),
    Answer(String),
}

impl ChatReply {
    pub fn is_clarification(&self) -> bool {
        matches!(self, Self::Clarification(_))
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_question_answered_ignores_whitespace() {
        let mut q = PendingQuestion {
            id: 0,
            question: "Which destination?".to_string(),
            category: Some("general".to_string()),
            answer: "   ".to_string(),
        };
        assert!(!q.is_answered());
        q.answer = "Kyoto".to_string();
        assert!(q.is_answered());
    }
}
