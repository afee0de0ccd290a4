use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
pub const ENV_HF_TOKEN: &str = "HF_TOKEN";
pub const ENV_PORT: &str = "PORT";

/// Files tried in order when `CONFIG_PATH` is not set
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["conf.yaml", "conf.yml", "conf.json"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub provider_config: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

fn default_true() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    100 * 1024
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Chat-completion provider settings
#[derive(Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Unset means the HTTP client's own default applies
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://router.huggingface.co/v1".to_string()
}

fn default_model() -> String {
    "meta-llama/Llama-3.3-70B-Instruct".to_string()
}

fn default_provider() -> String {
    "auto".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.1
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            provider: default_provider(),
            api_key: String::new(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "**redacted**" };
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("provider", &self.provider)
            .field("api_key", &api_key)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// An unresolved `${VAR}` placeholder is not a credential
    pub fn has_credential(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !is_unresolved_placeholder(key)
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file, chosen by extension.
    /// `${VAR}` placeholders are resolved through `lookup`.
    pub fn load(path: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("Failed to read config file: {}", path))?;
        // Strips a UTF-8 BOM if present
        let (content, _, _) = encoding_rs::UTF_8.decode(&bytes);
        let content = substitute_env_vars(&content, lookup)?;

        let path_lower = path.to_lowercase();
        let mut config: Config = if path_lower.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config: {}", path))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config: {}", path))?
        };

        if is_unresolved_placeholder(config.provider_config.api_key.trim()) {
            config.provider_config.api_key.clear();
        }
        Ok(config)
    }

    /// Resolve the config file to use. `CONFIG_PATH` must point at an existing
    /// file when set; otherwise the default names are tried and built-in
    /// defaults apply when none exists.
    pub fn discover(lookup: impl Fn(&str) -> Option<String>) -> Result<(Self, Option<String>)> {
        Self::discover_in(DEFAULT_CONFIG_PATHS, lookup)
    }

    /// Like [`Config::discover`] with an explicit list of fallback paths
    pub fn discover_in(
        candidates: &[&str],
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, Option<String>)> {
        if let Some(path) = lookup(ENV_CONFIG_PATH) {
            if !Path::new(&path).exists() {
                anyhow::bail!("Configuration file not found: {}", path);
            }
            return Ok((Self::load(&path, &lookup)?, Some(path)));
        }

        for path in candidates {
            if Path::new(path).exists() {
                return Ok((Self::load(path, &lookup)?, Some(path.to_string())));
            }
        }

        Ok((Self::default(), None))
    }

    /// `HF_TOKEN` fills an empty credential, `PORT` replaces the port
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if !self.provider_config.has_credential() {
            if let Some(token) = lookup(ENV_HF_TOKEN) {
                self.provider_config.api_key = token;
            }
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.system_config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} value: {}", ENV_PORT, port))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let provider = &self.provider_config;
        if provider.model.trim().is_empty() {
            anyhow::bail!("provider_config.model must not be empty");
        }
        if provider.base_url.trim().is_empty() {
            anyhow::bail!("provider_config.base_url must not be empty");
        }
        if provider.max_tokens == 0 {
            anyhow::bail!("provider_config.max_tokens must be > 0");
        }
        if !(0.0..=2.0).contains(&provider.temperature) {
            anyhow::bail!(
                "provider_config.temperature must be between 0 and 2, got {}",
                provider.temperature
            );
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.system_config.host, self.system_config.port)
    }
}

fn is_unresolved_placeholder(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

/// Replace `${VAR}` with the variable's value, leaving unknown variables as written
pub fn substitute_env_vars(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
