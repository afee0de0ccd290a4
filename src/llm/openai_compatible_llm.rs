use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::llm_interface::{
    ChatCompletionClient, ChatCompletionRequest, ChatMessage, CompletionError,
};

/// Routing hint that leaves provider selection to the inference router
pub const AUTO_PROVIDER: &str = "auto";

/// Chat-completion client for OpenAI-compatible endpoints such as the
/// Hugging Face inference router
pub struct OpenAICompatibleLLM {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: String,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAICompatibleLLM {
    pub fn new(
        base_url: String,
        api_key: String,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(
            "Initialized OpenAICompatibleLLM: base_url={}, timeout={:?}",
            base_url, timeout
        );

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Model identifier as sent on the wire. An explicit provider is pinned with a
/// `model:provider` suffix.
pub fn routed_model(model: &str, provider: &str) -> String {
    let provider = provider.trim();
    if provider.is_empty() || provider.eq_ignore_ascii_case(AUTO_PROVIDER) {
        model.to_string()
    } else {
        format!("{}:{}", model, provider)
    }
}

/// Pull a readable message out of a provider error body.
/// Handles `{"error": "..."}`, `{"error": {"message": "..."}}` and `{"message": "..."}`.
pub fn provider_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = match value.get("error") {
            Some(serde_json::Value::String(s)) => Some(s.as_str()),
            Some(err) => err.get("message").and_then(|m| m.as_str()),
            None => value.get("message").and_then(|m| m.as_str()),
        };
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAICompatibleLLM {
    async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, CompletionError> {
        let body = CompletionBody {
            model: routed_model(&request.model, &request.provider),
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Sending chat completion: model={}, messages={}",
            body.model,
            request.messages.len()
        );

        let mut builder = self.client.post(self.endpoint()).json(&body);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: provider_error_message(&error_text),
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;

        choice
            .message
            .and_then(|m| m.content)
            .ok_or(CompletionError::MissingContent)
    }
}
