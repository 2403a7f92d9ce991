use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::llm::LlmConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub elevenlabs: ElevenLabsConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub authoring: AuthoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Cloud storage configuration (Azure Blob Storage)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Standard Azure storage connection string
    /// (can reference env var with ${VAR_NAME}).
    pub connection_string: String,
    /// Blob container that receives uploads.
    pub container: String,
    /// Request timeout in seconds (default: 300)
    #[serde(default = "default_upload_timeout")]
    pub timeout_secs: u32,
}

fn default_upload_timeout() -> u32 {
    300
}

/// ElevenLabs account configuration, shared by speech-to-text and text-to-speech.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElevenLabsConfig {
    /// API key (can reference env var with ${VAR_NAME}).
    pub api_key: String,
    #[serde(default = "default_elevenlabs_base")]
    pub api_base: String,
    /// Request timeout in seconds (default: 300)
    #[serde(default = "default_elevenlabs_timeout")]
    pub timeout_secs: u32,
}

fn default_elevenlabs_base() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_timeout() -> u32 {
    300
}

/// Speech-to-text configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_stt_model")]
    pub model_id: String,
    /// Language hint passed to the transcriber (ISO 639-3).
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_id: default_stt_model(),
            language_code: default_language_code(),
        }
    }
}

fn default_stt_model() -> String {
    "scribe_v2".to_string()
}

fn default_language_code() -> String {
    "hin".to_string()
}

/// Text-to-speech configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeechConfig {
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_tts_model")]
    pub model_id: String,
    #[serde(default = "default_output_format")]
    pub output_format: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice_id: default_voice_id(),
            model_id: default_tts_model(),
            output_format: default_output_format(),
        }
    }
}

fn default_voice_id() -> String {
    "ipTsYx5BgSDPgZ2oCy9M".to_string()
}

fn default_tts_model() -> String {
    "eleven_multilingual_v2".to_string()
}

fn default_output_format() -> String {
    "mp3_44100_128".to_string()
}

/// Prompt configuration for translation and content generation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthoringConfig {
    /// Human-readable name of the spoken language, used in prompts.
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
        }
    }
}

fn default_source_language() -> String {
    "Hindi".to_string()
}

/// Local output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub storage: SanitizedStorageConfig,
    pub elevenlabs: SanitizedElevenLabsConfig,
    pub transcription: TranscriptionConfig,
    pub speech: SpeechConfig,
    pub llm: SanitizedLlmConfig,
    pub authoring: AuthoringConfig,
    pub output: OutputConfig,
}

/// Sanitized storage config (connection string hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedStorageConfig {
    pub container: String,
    pub connection_string_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized ElevenLabs config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedElevenLabsConfig {
    pub api_base: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized LLM config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedLlmConfig {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            storage: SanitizedStorageConfig {
                container: config.storage.container.clone(),
                connection_string_configured: !config.storage.connection_string.is_empty(),
                timeout_secs: config.storage.timeout_secs,
            },
            elevenlabs: SanitizedElevenLabsConfig {
                api_base: config.elevenlabs.api_base.clone(),
                api_key_configured: !config.elevenlabs.api_key.is_empty(),
                timeout_secs: config.elevenlabs.timeout_secs,
            },
            transcription: config.transcription.clone(),
            speech: config.speech.clone(),
            llm: SanitizedLlmConfig {
                provider: config.llm.provider.as_str().to_string(),
                model: config.llm.model.clone(),
                api_base: config.llm.api_base.clone(),
                api_key_configured: config
                    .llm
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.is_empty()),
            },
            authoring: config.authoring.clone(),
            output: config.output.clone(),
        }
    }
}
