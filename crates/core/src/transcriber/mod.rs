//! Speech-to-text for the source media.

mod elevenlabs;

pub use elevenlabs::ElevenLabsTranscriber;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during transcription.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("Failed to read audio from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Transcription API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// Converts spoken audio into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Name of this transcriber for logging.
    fn name(&self) -> &str;

    /// Transcribes the audio track of `audio`.
    ///
    /// `language_code` is a hint for the spoken language (e.g. `hin`).
    async fn transcribe(&self, audio: &Path, language_code: &str)
        -> Result<String, TranscriptionError>;
}
