use super::{types::Config, ConfigError};
use crate::storage::ConnectionString;

/// Validate configuration
/// Currently validates:
/// - Storage connection string parses and names a container
/// - ElevenLabs and LLM credentials are present
/// - Timeouts are not 0
/// - Language, voice and output settings are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Storage validation
    if config.storage.connection_string.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.connection_string is required".to_string(),
        ));
    }
    ConnectionString::parse(&config.storage.connection_string)
        .map_err(|e| ConfigError::ValidationError(format!("storage.connection_string: {}", e)))?;
    if config.storage.container.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.container is required".to_string(),
        ));
    }

    // Credentials
    if config.elevenlabs.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "elevenlabs.api_key is required".to_string(),
        ));
    }
    if config.llm.provider.requires_api_key()
        && config.llm.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(format!(
            "llm.api_key is required for provider {}",
            config.llm.provider.as_str()
        )));
    }

    // Timeouts
    for (name, value) in [
        ("storage.timeout_secs", config.storage.timeout_secs),
        ("elevenlabs.timeout_secs", config.elevenlabs.timeout_secs),
        ("llm.timeout_secs", config.llm.timeout_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!("{} cannot be 0", name)));
        }
    }

    if config.transcription.language_code.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcription.language_code cannot be empty".to_string(),
        ));
    }
    if config.speech.voice_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "speech.voice_id cannot be empty".to_string(),
        ));
    }
    if config.output.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
