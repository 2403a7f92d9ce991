//! LLM configuration types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::{AnthropicClient, LlmClient, LlmError};

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Anthropic Claude API.
    #[default]
    Anthropic,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
        }
    }

    /// Returns true if the provider cannot be used without an API key.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, LlmProvider::Anthropic)
    }
}

/// LLM client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// LLM provider.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Model name/identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key (can reference env var with ${VAR_NAME}).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_model() -> String {
    "claude-haiku-4-5-20251001".to_string()
}

fn default_timeout() -> u32 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Builds the client for the configured provider.
pub fn create_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    match config.provider {
        LlmProvider::Anthropic => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or(LlmError::NotConfigured)?;

            let mut client = AnthropicClient::new(api_key, &config.model)
                .with_timeout(Duration::from_secs(config.timeout_secs as u64));
            if let Some(base) = &config.api_base {
                client = client.with_api_base(base);
            }
            Ok(Arc::new(client))
        }
    }
}
