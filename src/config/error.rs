//! Errors raised while reading, parsing, validating or writing the config.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write config file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Configuration syntax error in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Configuration format error: {message}")]
    Format { message: String },

    #[error("Invalid configuration: {}", field_list(.errors))]
    Validation { errors: Vec<ValidationError> },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        ConfigError::Format {
            message: message.into(),
        }
    }

    /// Names of the fields that failed validation, empty for other errors.
    pub fn invalid_fields(&self) -> Vec<&str> {
        match self {
            ConfigError::Validation { errors } => {
                errors.iter().map(|err| err.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn error_label(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "read",
            ConfigError::Write { .. } => "write",
            ConfigError::Parse { .. } => "parse",
            ConfigError::Format { .. } => "format",
            ConfigError::Validation { .. } => "validation",
            ConfigError::Serialize(_) => "serialize",
        }
    }
}

fn field_list(errors: &[ValidationError]) -> String {
    let fields: Vec<&str> = errors.iter().map(|err| err.field.as_str()).collect();
    format!("missing or invalid fields: {}", fields.join(", "))
}
