//! Mock speech synthesizer for testing.

use async_trait::async_trait;
use futures::stream;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::speech::{AudioStream, SpeechError, SpeechSynthesizer};

/// A recorded synthesis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedSynthesis {
    pub text: String,
    pub voice_id: String,
}

/// Mock implementation of the SpeechSynthesizer trait.
///
/// Streams the configured chunks; an optional stream error is appended after
/// the last chunk to simulate an interrupted response.
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    chunks: Arc<RwLock<Vec<Vec<u8>>>>,
    calls: Arc<RwLock<Vec<RecordedSynthesis>>>,
    next_error: Arc<RwLock<Option<SpeechError>>>,
    stream_error: Arc<RwLock<Option<String>>>,
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self {
            chunks: Arc::new(RwLock::new(super::fixtures::audio_chunks())),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            stream_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_chunks(&self, chunks: Vec<Vec<u8>>) {
        *self.chunks.write().await = chunks;
    }

    /// Configure the next call to fail before streaming.
    pub async fn set_next_error(&self, error: SpeechError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next stream to break after its chunks.
    pub async fn set_stream_error(&self, message: impl Into<String>) {
        *self.stream_error.write().await = Some(message.into());
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedSynthesis> {
        self.calls.read().await.clone()
    }

    /// All configured chunks joined, i.e. the audio a run should collect.
    pub async fn expected_audio(&self) -> Vec<u8> {
        self.chunks.read().await.concat()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    fn name(&self) -> &str {
        "mock-synthesizer"
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError> {
        self.calls.write().await.push(RecordedSynthesis {
            text: text.to_string(),
            voice_id: voice_id.to_string(),
        });

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        let mut items: Vec<Result<Vec<u8>, SpeechError>> =
            self.chunks.read().await.iter().cloned().map(Ok).collect();
        if let Some(message) = self.stream_error.write().await.take() {
            items.push(Err(SpeechError::Stream(message)));
        }
        Ok(Box::pin(stream::iter(items)))
    }
}
