//! ElevenLabs text-to-speech client.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::config::{ElevenLabsConfig, SpeechConfig};
use crate::elevenlabs::{error_detail, API_KEY_HEADER};
use crate::metrics;

use super::{AudioStream, SpeechError, SpeechSynthesizer};

/// Synthesizer backed by the ElevenLabs `text-to-speech` endpoint.
pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: String,
    api_base: String,
    model_id: String,
    output_format: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsSynthesizer {
    pub fn new(account: &ElevenLabsConfig, config: &SpeechConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: account.api_key.clone(),
            api_base: account.api_base.trim_end_matches('/').to_string(),
            model_id: config.model_id.clone(),
            output_format: config.output_format.clone(),
            timeout: Duration::from_secs(account.timeout_secs as u64),
        }
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}?output_format={}",
            self.api_base,
            urlencoding::encode(voice_id),
            urlencoding::encode(&self.output_format)
        )
    }

    async fn request(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        debug!(voice_id, chars = text.chars().count(), "Requesting speech synthesis");

        let response = self
            .client
            .post(self.endpoint(voice_id))
            .timeout(self.timeout)
            .header(API_KEY_HEADER, &self.api_key)
            .header("accept", "audio/mpeg")
            .json(&SynthesisRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else {
                    SpeechError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Api {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        let stream = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| SpeechError::Stream(e.to_string()))
        });
        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<AudioStream, SpeechError> {
        let result = self.request(text, voice_id).await;
        metrics::record_service_call("elevenlabs", "text_to_speech", result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer() -> ElevenLabsSynthesizer {
        ElevenLabsSynthesizer::new(
            &ElevenLabsConfig {
                api_key: "key".to_string(),
                api_base: "https://api.elevenlabs.io".to_string(),
                timeout_secs: 10,
            },
            &SpeechConfig::default(),
        )
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            synthesizer().endpoint("ipTsYx5BgSDPgZ2oCy9M"),
            "https://api.elevenlabs.io/v1/text-to-speech/ipTsYx5BgSDPgZ2oCy9M?output_format=mp3_44100_128"
        );
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&SynthesisRequest {
            text: "Hello",
            model_id: "eleven_multilingual_v2",
        })
        .unwrap();
        assert_eq!(body, r#"{"text":"Hello","model_id":"eleven_multilingual_v2"}"#);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_request() {
        let result = synthesizer().synthesize("   ", "voice").await;
        assert!(matches!(result, Err(SpeechError::EmptyText)));
    }
}
