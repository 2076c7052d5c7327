pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatBackend, ChatSession, CompletionClient, HandleChatUseCase, ViewState,
};

pub use connector::{
    router, Container, ContainerConfig, HttpChatBackend, MockCompletion, OpenAiClient,
    TerminalChat,
};

pub use domain::{
    ChatReply, ClarificationQuestion, DomainError, Message, PendingQuestion, Role,
};
