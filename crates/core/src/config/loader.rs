use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
///
/// Nested keys are addressed with a double underscore, e.g.
/// `VIDPIPE_ELEVENLABS__API_KEY`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let mut config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("VIDPIPE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    resolve_secrets(&mut config)?;
    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    let mut config: Config =
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    resolve_secrets(&mut config)?;
    Ok(config)
}

/// Replaces `${VAR_NAME}` references in secret fields with the variable's value.
fn resolve_secrets(config: &mut Config) -> Result<(), ConfigError> {
    config.storage.connection_string = expand_env_ref(&config.storage.connection_string)?;
    config.elevenlabs.api_key = expand_env_ref(&config.elevenlabs.api_key)?;
    if let Some(key) = config.llm.api_key.as_mut() {
        *key = expand_env_ref(key)?;
    }
    Ok(())
}

fn expand_env_ref(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    match trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(name) => {
            std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
        }
        None => Ok(value.to_string()),
    }
}
