//! Mock transcriber for testing.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transcriber::{Transcriber, TranscriptionError};

/// A recorded transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTranscription {
    pub audio: PathBuf,
    pub language_code: String,
}

/// Mock implementation of the Transcriber trait.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    transcript: Arc<RwLock<String>>,
    calls: Arc<RwLock<Vec<RecordedTranscription>>>,
    next_error: Arc<RwLock<Option<TranscriptionError>>>,
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            transcript: Arc::new(RwLock::new(super::fixtures::HINDI_TRANSCRIPT.to_string())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the transcript returned by subsequent calls.
    pub async fn set_transcript(&self, transcript: impl Into<String>) {
        *self.transcript.write().await = transcript.into();
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: TranscriptionError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedTranscription> {
        self.calls.read().await.clone()
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &str {
        "mock-transcriber"
    }

    async fn transcribe(
        &self,
        audio: &Path,
        language_code: &str,
    ) -> Result<String, TranscriptionError> {
        self.calls.write().await.push(RecordedTranscription {
            audio: audio.to_path_buf(),
            language_code: language_code.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        Ok(self.transcript.read().await.clone())
    }
}
