use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{CompletionClient, HandleChatUseCase};
use crate::connector::adapter::{MockCompletion, OpenAiClient};

/// Server configuration, resolved from the environment and CLI flags.
pub struct ContainerConfig {
    /// Use the canned completion adapter instead of the OpenAI API.
    pub mock_llm: bool,
}

/// Wires adapters into use cases for the HTTP server.
///
/// When no API key is configured the container still builds; the use case
/// rejects each request with a configuration error instead, so the server
/// starts and reports the problem per call.
pub struct Container {
    handle_chat: Arc<HandleChatUseCase>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let client: Option<Arc<dyn CompletionClient>> = if config.mock_llm {
            debug!("Using mock completion client");
            Some(Arc::new(MockCompletion::new()))
        } else {
            match OpenAiClient::from_env() {
                Some(client) => Some(Arc::new(client)),
                None => {
                    info!("OPENAI_API_KEY is not set; chat requests will fail until it is");
                    None
                }
            }
        };

        Self::with_client(client)
    }

    /// Build from an explicit completion client (or none). Used by tests to
    /// inject scripted clients.
    pub fn with_client(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self {
            handle_chat: Arc::new(HandleChatUseCase::new(client)),
        }
    }

    pub fn handle_chat_use_case(&self) -> Arc<HandleChatUseCase> {
        Arc::clone(&self.handle_chat)
    }
}
