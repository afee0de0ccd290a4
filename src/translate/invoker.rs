use std::sync::Arc;
use tracing::debug;

use super::interface::TranslationRequest;
use super::prompt::build_messages;
use crate::config::ProviderConfig;
use crate::llm::{ChatCompletionClient, ChatCompletionRequest, CompletionError};

/// Fixed generation parameters for every invocation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub provider: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&ProviderConfig> for GenerationSettings {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            provider: config.provider.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&ProviderConfig::default())
    }
}

/// Turns a validated request into one chat-completion call. No caching and
/// no retry: identical requests hit the provider every time.
pub struct Translator {
    client: Arc<dyn ChatCompletionClient>,
    settings: GenerationSettings,
}

impl Translator {
    pub fn new(client: Arc<dyn ChatCompletionClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    pub async fn translate(&self, request: &TranslationRequest) -> Result<String, CompletionError> {
        let completion = ChatCompletionRequest {
            model: self.settings.model.clone(),
            provider: self.settings.provider.clone(),
            messages: build_messages(&request.text, &request.from_lang, &request.to_lang),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let content = self.client.chat_completion(&completion).await?;
        let translated = content.trim().to_string();
        debug!("Translation returned {} chars", translated.len());
        Ok(translated)
    }
}
