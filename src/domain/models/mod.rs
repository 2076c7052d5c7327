mod clarification;
mod message;

pub use clarification::{ChatReply, ClarificationQuestion, PendingQuestion};
pub use message::{Message, Role};
