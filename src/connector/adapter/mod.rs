mod mock_completion;
mod openai_client;

pub use mock_completion::MockCompletion;
pub use openai_client::OpenAiClient;
