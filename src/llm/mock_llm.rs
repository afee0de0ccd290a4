use async_trait::async_trait;
use std::sync::Mutex;

use super::llm_interface::{ChatCompletionClient, ChatCompletionRequest, CompletionError};

enum MockReply {
    Content(String),
    Api { status: u16, message: String },
    EmptyChoices,
}

/// In-process completion client that records every request and answers with a
/// scripted reply
pub struct MockLLM {
    reply: MockReply,
    calls: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockLLM {
    /// Every call returns `content` as the first candidate's message
    pub fn replying(content: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Content(content.into()))
    }

    /// Every call fails as if the provider answered with a non-2xx status
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Api {
            status,
            message: message.into(),
        })
    }

    /// Every call succeeds at the transport level but carries no candidates
    pub fn without_choices() -> Self {
        Self::with_reply(MockReply::EmptyChoices)
    }

    fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ChatCompletionRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ChatCompletionClient for MockLLM {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, CompletionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        match &self.reply {
            MockReply::Content(content) => Ok(content.clone()),
            MockReply::Api { status, message } => Err(CompletionError::Api {
                status: *status,
                message: message.clone(),
            }),
            MockReply::EmptyChoices => Err(CompletionError::EmptyChoices),
        }
    }
}
