mod http_backend;
mod terminal;

pub use http_backend::HttpChatBackend;
pub use terminal::TerminalChat;
