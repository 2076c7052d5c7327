pub mod error;
pub mod models;

pub use error::DomainError;
pub use models::{ChatReply, ClarificationQuestion, Message, PendingQuestion, Role};
