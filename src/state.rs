use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatCompletionClient, OpenAICompatibleLLM};
use crate::translate::{GenerationSettings, Translator};

/// Read-only after startup, cloned into every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let provider = &config.provider_config;
        let client = Arc::new(OpenAICompatibleLLM::new(
            provider.base_url.clone(),
            provider.api_key.clone(),
            provider.request_timeout(),
        )?);

        Ok(Self::with_client(config, client))
    }

    /// Build state around an already constructed completion client
    pub fn with_client(config: Config, client: Arc<dyn ChatCompletionClient>) -> Self {
        let settings = GenerationSettings::from(&config.provider_config);
        Self {
            config: Arc::new(config),
            translator: Arc::new(Translator::new(client, settings)),
        }
    }
}
