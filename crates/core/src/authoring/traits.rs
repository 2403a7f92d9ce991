//! Traits for authoring components.

use async_trait::async_trait;
use thiserror::Error;

use crate::llm::LlmError;

/// Errors that can occur while generating text.
#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Model returned an empty {0}")]
    EmptyOutput(&'static str),
}

/// Translates transcript text into English.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Name of this translator for logging.
    fn name(&self) -> &str;

    async fn translate(&self, text: &str) -> Result<String, AuthoringError>;
}

/// Produces editorial and promotional text from a transcript.
#[async_trait]
pub trait ContentWriter: Send + Sync {
    /// Name of this writer for logging.
    fn name(&self) -> &str;

    /// Generates an editor script (segments, B-roll, overlays, transitions,
    /// music and cut notes) for the transcript.
    async fn editor_script(&self, transcript: &str) -> Result<String, AuthoringError>;

    /// Generates Instagram and LinkedIn captions in the marker-delimited format
    /// understood by [`parse_captions`](super::parse_captions).
    async fn social_captions(&self, transcript: &str) -> Result<String, AuthoringError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthoringError::from(LlmError::Http("connection refused".to_string()));
        assert_eq!(err.to_string(), "LLM error: HTTP error: connection refused");

        let err = AuthoringError::EmptyOutput("translation");
        assert_eq!(err.to_string(), "Model returned an empty translation");
    }
}
