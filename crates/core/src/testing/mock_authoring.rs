//! Mock translator and content writer for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::authoring::{AuthoringError, ContentWriter, Translator};

use super::fixtures;

/// Mock implementation of the Translator trait.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    translation: Arc<RwLock<String>>,
    inputs: Arc<RwLock<Vec<String>>>,
    next_error: Arc<RwLock<Option<AuthoringError>>>,
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranslator {
    pub fn new() -> Self {
        Self {
            translation: Arc::new(RwLock::new(fixtures::ENGLISH_TRANSCRIPT.to_string())),
            inputs: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_translation(&self, translation: impl Into<String>) {
        *self.translation.write().await = translation.into();
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: AuthoringError) {
        *self.next_error.write().await = Some(error);
    }

    /// Texts passed to `translate`, in call order.
    pub async fn recorded_inputs(&self) -> Vec<String> {
        self.inputs.read().await.clone()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    fn name(&self) -> &str {
        "mock-translator"
    }

    async fn translate(&self, text: &str) -> Result<String, AuthoringError> {
        self.inputs.write().await.push(text.to_string());

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(self.translation.read().await.clone())
    }
}

/// Mock implementation of the ContentWriter trait.
///
/// Editor script and caption calls are configured and recorded separately.
#[derive(Debug, Clone)]
pub struct MockContentWriter {
    editor_script: Arc<RwLock<String>>,
    captions: Arc<RwLock<String>>,
    editor_inputs: Arc<RwLock<Vec<String>>>,
    caption_inputs: Arc<RwLock<Vec<String>>>,
    next_editor_error: Arc<RwLock<Option<AuthoringError>>>,
    next_captions_error: Arc<RwLock<Option<AuthoringError>>>,
}

impl Default for MockContentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContentWriter {
    pub fn new() -> Self {
        Self {
            editor_script: Arc::new(RwLock::new(fixtures::EDITOR_SCRIPT.to_string())),
            captions: Arc::new(RwLock::new(fixtures::captions_response(
                fixtures::INSTAGRAM_CAPTION,
                fixtures::LINKEDIN_CAPTION,
            ))),
            editor_inputs: Arc::new(RwLock::new(Vec::new())),
            caption_inputs: Arc::new(RwLock::new(Vec::new())),
            next_editor_error: Arc::new(RwLock::new(None)),
            next_captions_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the raw caption response, markers included.
    pub async fn set_captions(&self, response: impl Into<String>) {
        *self.captions.write().await = response.into();
    }

    pub async fn set_next_editor_error(&self, error: AuthoringError) {
        *self.next_editor_error.write().await = Some(error);
    }

    pub async fn set_next_captions_error(&self, error: AuthoringError) {
        *self.next_captions_error.write().await = Some(error);
    }

    /// Transcripts passed to `editor_script`.
    pub async fn recorded_editor_inputs(&self) -> Vec<String> {
        self.editor_inputs.read().await.clone()
    }

    /// Transcripts passed to `social_captions`.
    pub async fn recorded_caption_inputs(&self) -> Vec<String> {
        self.caption_inputs.read().await.clone()
    }
}

#[async_trait]
impl ContentWriter for MockContentWriter {
    fn name(&self) -> &str {
        "mock-writer"
    }

    async fn editor_script(&self, transcript: &str) -> Result<String, AuthoringError> {
        self.editor_inputs.write().await.push(transcript.to_string());

        if let Some(err) = self.next_editor_error.write().await.take() {
            return Err(err);
        }
        Ok(self.editor_script.read().await.clone())
    }

    async fn social_captions(&self, transcript: &str) -> Result<String, AuthoringError> {
        self.caption_inputs.write().await.push(transcript.to_string());

        if let Some(err) = self.next_captions_error.write().await.take() {
            return Err(err);
        }
        Ok(self.captions.read().await.clone())
    }
}
