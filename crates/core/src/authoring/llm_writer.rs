//! LLM-backed translator and content writer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::llm::{CompletionRequest, LlmClient};

use super::prompts::{
    editor_script_prompt, social_captions_prompt, translation_prompt, CAPTIONS_MAX_TOKENS,
    EDITOR_SCRIPT_MAX_TOKENS, TRANSLATION_MAX_TOKENS,
};
use super::traits::{AuthoringError, ContentWriter, Translator};

/// Sends a single-turn prompt and returns the generated text.
async fn generate(
    llm: &dyn LlmClient,
    prompt: String,
    max_tokens: u32,
    what: &'static str,
) -> Result<String, AuthoringError> {
    let request = CompletionRequest::new(prompt).with_max_tokens(max_tokens);
    let response = llm.complete(request).await?;

    debug!(
        provider = llm.provider(),
        model = %response.model,
        output_tokens = response.usage.output_tokens,
        "Generated {}",
        what
    );

    if response.text.trim().is_empty() {
        return Err(AuthoringError::EmptyOutput(what));
    }
    Ok(response.text)
}

/// Translator that prompts a text-generation model.
pub struct LlmTranslator {
    llm: Arc<dyn LlmClient>,
    source_language: String,
}

impl LlmTranslator {
    pub fn new(llm: Arc<dyn LlmClient>, source_language: impl Into<String>) -> Self {
        Self {
            llm,
            source_language: source_language.into(),
        }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    fn name(&self) -> &str {
        "llm"
    }

    async fn translate(&self, text: &str) -> Result<String, AuthoringError> {
        let prompt = translation_prompt(&self.source_language, text);
        generate(self.llm.as_ref(), prompt, TRANSLATION_MAX_TOKENS, "translation").await
    }
}

/// Editor script and caption writer that prompts a text-generation model.
pub struct LlmContentWriter {
    llm: Arc<dyn LlmClient>,
}

impl LlmContentWriter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentWriter for LlmContentWriter {
    fn name(&self) -> &str {
        "llm"
    }

    async fn editor_script(&self, transcript: &str) -> Result<String, AuthoringError> {
        let prompt = editor_script_prompt(transcript);
        generate(
            self.llm.as_ref(),
            prompt,
            EDITOR_SCRIPT_MAX_TOKENS,
            "editor script",
        )
        .await
    }

    async fn social_captions(&self, transcript: &str) -> Result<String, AuthoringError> {
        let prompt = social_captions_prompt(transcript);
        generate(self.llm.as_ref(), prompt, CAPTIONS_MAX_TOKENS, "caption set").await
    }
}
