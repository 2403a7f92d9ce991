//! ElevenLabs speech-to-text client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use tracing::debug;

use crate::config::{ElevenLabsConfig, TranscriptionConfig};
use crate::elevenlabs::{error_detail, API_KEY_HEADER};
use crate::metrics;

use super::{Transcriber, TranscriptionError};

/// Transcriber backed by the ElevenLabs `speech-to-text` endpoint.
pub struct ElevenLabsTranscriber {
    client: Client,
    api_key: String,
    api_base: String,
    model_id: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    #[serde(default)]
    language_code: Option<String>,
}

impl ElevenLabsTranscriber {
    pub fn new(account: &ElevenLabsConfig, config: &TranscriptionConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: account.api_key.clone(),
            api_base: account.api_base.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            timeout: Duration::from_secs(account.timeout_secs as u64),
        }
    }

    async fn request(
        &self,
        audio: &Path,
        language_code: &str,
    ) -> Result<String, TranscriptionError> {
        let data = tokio::fs::read(audio)
            .await
            .map_err(|source| TranscriptionError::Io {
                path: audio.to_path_buf(),
                source,
            })?;

        let file_name = audio
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio".to_string());

        debug!(file = %file_name, bytes = data.len(), language_code, "Submitting audio for transcription");

        let form = multipart::Form::new()
            .text("model_id", self.model_id.clone())
            .text("language_code", language_code.to_string())
            .part("file", multipart::Part::bytes(data).file_name(file_name));

        let response = self
            .client
            .post(format!("{}/v1/speech-to-text", self.api_base))
            .timeout(self.timeout)
            .header(API_KEY_HEADER, &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout
                } else {
                    TranscriptionError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        debug!(
            detected_language = parsed.language_code.as_deref().unwrap_or("unknown"),
            chars = parsed.text.chars().count(),
            "Transcription received"
        );

        Ok(parsed.text)
    }
}

#[async_trait]
impl Transcriber for ElevenLabsTranscriber {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn transcribe(
        &self,
        audio: &Path,
        language_code: &str,
    ) -> Result<String, TranscriptionError> {
        let result = self.request(audio, language_code).await;
        metrics::record_service_call("elevenlabs", "speech_to_text", result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcriber() -> ElevenLabsTranscriber {
        ElevenLabsTranscriber::new(
            &ElevenLabsConfig {
                api_key: "key".to_string(),
                api_base: "https://api.elevenlabs.io/".to_string(),
                timeout_secs: 10,
            },
            &TranscriptionConfig::default(),
        )
    }

    #[test]
    fn test_new_applies_config() {
        let t = transcriber();
        assert_eq!(t.api_base, "https://api.elevenlabs.io");
        assert_eq!(t.model_id, "scribe_v2");
        assert_eq!(t.name(), "elevenlabs");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"language_code":"hin","language_probability":0.98,"text":"नमस्ते","words":[]}"#;
        let parsed: TranscriptionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text, "नमस्ते");
        assert_eq!(parsed.language_code.as_deref(), Some("hin"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let t = transcriber();
        let err = t
            .transcribe(Path::new("/nonexistent/clip.mp4"), "hin")
            .await
            .unwrap_err();
        assert!(matches!(err, TranscriptionError::Io { .. }));
    }
}
