//! Orchestrator configuration.

use crate::config::Config;

/// Settings the orchestrator passes to its collaborators on each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Language hint for the transcriber.
    pub language_code: String,
    /// Voice used for the English audio track.
    pub voice_id: String,
    /// Name of the recording's language, shown in progress text.
    pub source_language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language_code: "hin".to_string(),
            voice_id: "ipTsYx5BgSDPgZ2oCy9M".to_string(),
            source_language: "Hindi".to_string(),
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            language_code: config.transcription.language_code.clone(),
            voice_id: config.speech.voice_id.clone(),
            source_language: config.authoring.source_language.clone(),
        }
    }
}
