pub mod chat_session;
pub mod classify;
pub mod handle_chat;

pub use chat_session::{ChatSession, ViewState};
pub use handle_chat::HandleChatUseCase;
