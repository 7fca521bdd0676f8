//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ShortenerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Errors raised while loading the service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`ShortenerConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but failed semantic checks.
    #[error("config validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ShortenerConfig, ConfigError> {
    let config: ShortenerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ShortenerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
