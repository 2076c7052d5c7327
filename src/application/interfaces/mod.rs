mod chat_backend;
mod completion_client;

pub use chat_backend::ChatBackend;
pub use completion_client::CompletionClient;
