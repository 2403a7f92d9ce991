//! Text generation clients.
//!
//! Translation, editorial scripts and social captions are all produced by a
//! text-generation model behind the `LlmClient` trait. The only hosted
//! provider wired in is Anthropic.

mod anthropic;
mod client;
mod config;

pub use anthropic::AnthropicClient;
pub use client::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};
pub use config::{create_llm_client, LlmConfig, LlmProvider};
