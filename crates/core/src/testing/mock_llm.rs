//! Mock LLM client for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the LlmClient trait.
///
/// Replies are served from a queue; once it is empty every request gets
/// the default reply.
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    replies: Arc<RwLock<VecDeque<Result<String, LlmError>>>>,
    default_reply: Arc<RwLock<String>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(RwLock::new(VecDeque::new())),
            default_reply: Arc::new(RwLock::new("mock response".to_string())),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Queue a successful reply.
    pub async fn push_response(&self, text: impl Into<String>) {
        self.replies.write().await.push_back(Ok(text.into()));
    }

    /// Queue a failed reply.
    pub async fn push_error(&self, error: LlmError) {
        self.replies.write().await.push_back(Err(error));
    }

    pub async fn set_default_reply(&self, text: impl Into<String>) {
        *self.default_reply.write().await = text.into();
    }

    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        let reply = self.replies.write().await.pop_front();
        let text = match reply {
            Some(reply) => reply?,
            None => self.default_reply.read().await.clone(),
        };

        Ok(CompletionResponse {
            usage: LlmUsage {
                input_tokens: 100,
                output_tokens: text.len() as u32,
            },
            text,
            model: "mock-model".to_string(),
        })
    }
}
