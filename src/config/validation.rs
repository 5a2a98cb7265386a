//! Required-field validation and advisory checks.

use std::fmt;
use std::path::PathBuf;

use crate::config::env::clean_patterns;
use crate::config::schema::{
    ConfluenceSettings, DEFAULT_LOCAL_PATH, RawConfig, SyncSettings, TEMPLATE_API_TOKEN,
    TEMPLATE_SPACE_KEY, TEMPLATE_URL,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("{field} is required and cannot be empty"),
            suggestion: env_hint(field).map(|var| format!("Set confluence.{field} or {var}")),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

/// Checks the merged configuration and builds the settings record.
///
/// All missing or invalid fields are reported together. A whitespace-only
/// value counts as missing; other values are kept exactly as given.
pub fn validate_config(raw: RawConfig) -> Result<SyncSettings, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let confluence = raw.confluence.unwrap_or_default();

    let url = require("url", confluence.url, &mut errors);
    let api_token = require("api_token", confluence.api_token, &mut errors);
    let space_key = require("space_key", confluence.space_key, &mut errors);
    let username = confluence.username.filter(|name| !name.trim().is_empty());

    let local_path = validate_local_path(raw.local_path, &mut errors);
    let ignore_patterns = clean_patterns(raw.ignore_patterns.unwrap_or_default());

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SyncSettings {
        confluence: ConfluenceSettings {
            url,
            api_token,
            space_key,
            username,
        },
        local_path,
        ignore_patterns,
    })
}

/// Advisory checks on an already valid record.
pub fn check_settings(settings: &SyncSettings) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let confluence = &settings.confluence;

    if !is_http_url(&confluence.url) {
        warnings.push(ValidationWarning {
            field: "confluence.url".to_string(),
            message: "URL should start with http:// or https://".to_string(),
        });
    }

    let placeholders = [
        ("confluence.url", confluence.url.as_str(), TEMPLATE_URL),
        (
            "confluence.api_token",
            confluence.api_token.as_str(),
            TEMPLATE_API_TOKEN,
        ),
        (
            "confluence.space_key",
            confluence.space_key.as_str(),
            TEMPLATE_SPACE_KEY,
        ),
    ];
    for (field, value, placeholder) in placeholders {
        if value == placeholder {
            warnings.push(ValidationWarning {
                field: field.to_string(),
                message: "Still set to the template placeholder".to_string(),
            });
        }
    }

    for (index, pattern) in settings.ignore_patterns.iter().enumerate() {
        if settings.ignore_patterns[..index].contains(pattern) {
            warnings.push(ValidationWarning {
                field: format!("ignore_patterns[{index}]"),
                message: format!("Duplicate pattern: {pattern}"),
            });
        }
    }

    warnings
}

fn require(field: &str, value: Option<String>, errors: &mut Vec<ValidationError>) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            errors.push(ValidationError::required(field));
            String::new()
        }
    }
}

fn validate_local_path(value: Option<String>, errors: &mut Vec<ValidationError>) -> PathBuf {
    let Some(value) = value else {
        return PathBuf::from(DEFAULT_LOCAL_PATH);
    };

    if value.trim().is_empty() {
        errors.push(ValidationError {
            field: "local_path".to_string(),
            message: "local_path cannot be empty".to_string(),
            suggestion: Some(format!("Remove the key to use \"{DEFAULT_LOCAL_PATH}\"")),
        });
    } else if value.contains('\0') {
        errors.push(ValidationError {
            field: "local_path".to_string(),
            message: "local_path contains a NUL byte".to_string(),
            suggestion: None,
        });
    }
    PathBuf::from(value)
}

fn env_hint(field: &str) -> Option<&'static str> {
    match field {
        "url" => Some(crate::config::env::ENV_URL),
        "api_token" => Some(crate::config::env::ENV_API_TOKEN),
        "space_key" => Some(crate::config::env::ENV_SPACE_KEY),
        _ => None,
    }
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value.starts_with("http://") || value.starts_with("https://")
}
