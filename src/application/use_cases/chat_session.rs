use std::sync::Arc;

use crate::application::interfaces::ChatBackend;
use crate::domain::{ChatReply, Message, PendingQuestion};

/// What the client should render. Exactly one variant is active at a time,
/// which rules out impossible combinations such as an error banner and a
/// clarification form both claiming the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Free-text input is active.
    Idle,
    /// A request is in flight; input is disabled.
    AwaitingAnswer,
    /// The clarification form is active.
    AwaitingClarification,
    /// A dismissable error banner is shown over the previous input.
    Error(String),
}

/// Client-side conversation state machine.
///
/// Holds the transcript and the pending clarification form, and transitions
/// between [`ViewState`] variants driven solely by backend replies. The
/// transcript is only extended after a round-trip succeeds, so a failed call
/// leaves history unchanged apart from the error banner.
pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    conversation: Vec<Message>,
    pending: Vec<PendingQuestion>,
    answered: Vec<PendingQuestion>,
    state: ViewState,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            conversation: Vec::new(),
            pending: Vec::new(),
            answered: Vec::new(),
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn conversation(&self) -> &[Message] {
        &self.conversation
    }

    pub fn pending_questions(&self) -> &[PendingQuestion] {
        &self.pending
    }

    /// Questions answered in the most recent clarification round, kept for
    /// display only.
    pub fn answered_questions(&self) -> &[PendingQuestion] {
        &self.answered
    }

    /// The clarification form renders iff questions are pending; otherwise
    /// the free-text input renders. Never both.
    pub fn form_active(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Submit a free-text message. A no-op when the text is blank, a request
    /// is already in flight, or a clarification form is pending (the free-text
    /// input is not rendered in that state).
    pub async fn submit_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() || self.state == ViewState::AwaitingAnswer || self.form_active() {
            return;
        }

        let candidate = Message::user(text);
        let mut outgoing = self.conversation.clone();
        outgoing.push(candidate.clone());

        self.state = ViewState::AwaitingAnswer;
        match self.backend.send(&outgoing).await {
            Ok(ChatReply::Clarification(questions)) => {
                self.conversation.push(candidate);
                self.install_form(questions.into_iter().map(|q| (q.question, Some(q.category))));
            }
            Ok(ChatReply::Answer(content)) => {
                self.conversation.push(candidate);
                self.conversation.push(Message::assistant(content));
                self.state = ViewState::Idle;
            }
            Err(err) => {
                self.state = ViewState::Error(err.to_string());
            }
        }
    }

    /// Record the user's answer for the pending question with the given id.
    pub fn set_answer(&mut self, id: u32, answer: impl Into<String>) {
        if let Some(question) = self.pending.iter_mut().find(|q| q.id == id) {
            question.answer = answer.into();
        }
    }

    /// Submit the filled clarification form. Rejected locally (error banner,
    /// no network call) while any answer is blank.
    pub async fn submit_clarifications(&mut self) {
        if self.pending.is_empty() || self.state == ViewState::AwaitingAnswer {
            return;
        }
        if !self.pending.iter().all(PendingQuestion::is_answered) {
            self.state = ViewState::Error("Please answer every question.".to_string());
            return;
        }

        let synthetic = Message::user(encode_clarifications(&self.pending));
        let mut outgoing = self.conversation.clone();
        outgoing.push(synthetic.clone());

        self.state = ViewState::AwaitingAnswer;
        match self.backend.send(&outgoing).await {
            Ok(ChatReply::Answer(content)) => {
                self.conversation.push(synthetic);
                self.conversation.push(Message::assistant(content));
                self.answered = std::mem::take(&mut self.pending);
                self.state = ViewState::Idle;
            }
            Ok(ChatReply::Clarification(questions)) => {
                // The handler judged the clarified message still ambiguous;
                // start a fresh round.
                self.conversation.push(synthetic);
                self.answered = std::mem::take(&mut self.pending);
                self.install_form(questions.into_iter().map(|q| (q.question, Some(q.category))));
            }
            Err(err) => {
                // Keep the pending form so the user can retry.
                self.state = ViewState::Error(err.to_string());
            }
        }
    }

    /// Dismiss the error banner, returning to whichever input was active.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, ViewState::Error(_)) {
            self.state = if self.form_active() {
                ViewState::AwaitingClarification
            } else {
                ViewState::Idle
            };
        }
    }

    /// Install a clarification form with position-based ids and empty answers.
    fn install_form(&mut self, questions: impl Iterator<Item = (String, Option<String>)>) {
        self.pending = questions
            .enumerate()
            .map(|(index, (question, category))| PendingQuestion {
                id: index as u32,
                question,
                category,
                answer: String::new(),
            })
            .collect();
        self.state = if self.pending.is_empty() {
            ViewState::Idle
        } else {
            ViewState::AwaitingClarification
        };
    }
}

/// Serialize the filled form into the single synthetic user message sent back
/// to the handler.
fn encode_clarifications(questions: &[PendingQuestion]) -> String {
    serde_json::json!({ "clarifications": questions }).to_string()
}
