//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Check inline redirect entries can ever match a request
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShortenerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Destination URLs are not checked beyond being present

use std::net::SocketAddr;

use crate::config::schema::ShortenerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. `redirects.paths[0].url`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ShortenerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a valid socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if let Some(file) = &config.redirects.file {
        if file.as_os_str().is_empty() {
            errors.push(ValidationError::new("redirects.file", "must not be empty"));
        }
    }

    for (i, entry) in config.redirects.paths.iter().enumerate() {
        if !entry.path.starts_with('/') {
            errors.push(ValidationError::new(
                format!("redirects.paths[{}].path", i),
                format!("'{}' must start with '/'", entry.path),
            ));
        }
        if entry.url.is_empty() {
            errors.push(ValidationError::new(
                format!("redirects.paths[{}].url", i),
                "must not be empty",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
