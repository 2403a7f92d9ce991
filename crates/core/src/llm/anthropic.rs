//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::client::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};
use crate::metrics;

const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Anthropic API client.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, request: CompletionRequest) -> AnthropicRequest {
        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
        }
    }

    async fn send(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let anthropic_request = self.build_request(request);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(LlmError::Api { status, message });
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Json(e.to_string()))?;

        let text = collect_text(anthropic_response.content)?;

        debug!(
            model = %anthropic_response.model,
            input_tokens = anthropic_response.usage.input_tokens,
            output_tokens = anthropic_response.usage.output_tokens,
            "Anthropic completion finished"
        );

        Ok(CompletionResponse {
            text,
            usage: LlmUsage {
                input_tokens: anthropic_response.usage.input_tokens,
                output_tokens: anthropic_response.usage.output_tokens,
            },
            model: anthropic_response.model,
        })
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    model: String,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

/// Joins the text blocks of a response; a response without any is malformed.
fn collect_text(content: Vec<AnthropicContent>) -> Result<String, LlmError> {
    let blocks: Vec<String> = content
        .into_iter()
        .filter(|c| c.content_type == "text")
        .map(|c| c.text)
        .collect();

    if blocks.is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(blocks.join(""))
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn provider(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let result = self.send(request).await;

        metrics::record_service_call("anthropic", "messages", result.is_ok());
        if let Ok(response) = &result {
            metrics::LLM_TOKENS
                .with_label_values(&["anthropic", "input"])
                .inc_by(response.usage.input_tokens as u64);
            metrics::LLM_TOKENS
                .with_label_values(&["anthropic", "output"])
                .inc_by(response.usage.output_tokens as u64);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anthropic_client_creation() {
        let client = AnthropicClient::new("key", "claude-haiku-4-5-20251001");
        assert_eq!(client.provider(), "anthropic");
        assert_eq!(client.model(), "claude-haiku-4-5-20251001");
        assert_eq!(client.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_custom_base_trims_trailing_slash() {
        let client = AnthropicClient::new("key", "model").with_api_base("http://proxy:8080/");
        assert_eq!(client.api_base, "http://proxy:8080");
    }

    #[test]
    fn test_request_serialization_sends_single_user_message() {
        let client = AnthropicClient::new("key", "model");
        let request =
            client.build_request(CompletionRequest::new("Translate this").with_max_tokens(4096));

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"max_tokens\":4096"));
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("temperature"));
        assert!(!json.contains("system"));
    }

    #[test]
    fn test_collect_text_joins_text_blocks() {
        let content = vec![
            AnthropicContent {
                content_type: "text".to_string(),
                text: "Hello ".to_string(),
            },
            AnthropicContent {
                content_type: "tool_use".to_string(),
                text: String::new(),
            },
            AnthropicContent {
                content_type: "text".to_string(),
                text: "world".to_string(),
            },
        ];
        assert_eq!(collect_text(content).unwrap(), "Hello world");
    }

    #[test]
    fn test_collect_text_without_text_blocks_is_error() {
        assert!(matches!(collect_text(vec![]), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let parsed: AnthropicError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "invalid x-api-key");
    }
}
