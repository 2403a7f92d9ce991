//! Text-to-speech synthesis.
//!
//! Synthesizers return audio as a stream of chunks; `collect_audio`
//! concatenates them into a single buffer.

mod elevenlabs;

pub use elevenlabs::ElevenLabsSynthesizer;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use thiserror::Error;

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Speech API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Audio stream interrupted: {0}")]
    Stream(String),

    #[error("Cannot synthesize empty text")]
    EmptyText,
}

/// Chunked audio returned by a synthesizer.
pub type AudioStream = BoxStream<'static, Result<Vec<u8>, SpeechError>>;

/// Converts text into spoken audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Name of this synthesizer for logging.
    fn name(&self) -> &str;

    /// Starts synthesizing `text` with the given voice.
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError>;
}

/// Drains an audio stream into one contiguous buffer.
pub async fn collect_audio(mut stream: AudioStream) -> Result<Vec<u8>, SpeechError> {
    let mut audio = Vec::new();
    while let Some(chunk) = stream.next().await {
        audio.extend_from_slice(&chunk?);
    }
    Ok(audio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_collect_audio_concatenates_chunks() {
        let chunks: AudioStream = Box::pin(stream::iter(vec![
            Ok(vec![1, 2]),
            Ok(vec![]),
            Ok(vec![3]),
        ]));
        assert_eq!(collect_audio(chunks).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_collect_audio_stops_on_error() {
        let chunks: AudioStream = Box::pin(stream::iter(vec![
            Ok(vec![1]),
            Err(SpeechError::Stream("connection reset".to_string())),
            Ok(vec![2]),
        ]));
        let err = collect_audio(chunks).await.unwrap_err();
        assert!(matches!(err, SpeechError::Stream(_)));
    }
}
