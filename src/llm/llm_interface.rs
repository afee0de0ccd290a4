use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag attached to a single conversational turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call as the provider sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    /// Provider-routing hint, `auto` lets the router decide
    pub provider: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Every way a completion call can fail. Callers treat all of them as one
/// failure class and surface only the display text.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider returned no completion choices")]
    EmptyChoices,

    #[error("Provider completion has no message content")]
    MissingContent,
}

/// Interface for a remote chat-completion capability.
/// Implementations hold no per-request state and are shared across requests.
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send the conversation and return the first candidate's message content,
    /// untouched.
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, CompletionError>;
}
