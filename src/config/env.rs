//! Environment-variable overlay.
//!
//! Values are trimmed; a variable that is unset or blank leaves the file
//! value untouched.

use std::collections::HashMap;
use std::env;

use crate::config::error::ConfigError;
use crate::config::schema::RawConfig;

pub const ENV_URL: &str = "CONFLUENCE_URL";
pub const ENV_API_TOKEN: &str = "CONFLUENCE_API_TOKEN";
pub const ENV_SPACE_KEY: &str = "CONFLUENCE_SPACE_KEY";
pub const ENV_USERNAME: &str = "CONFLUENCE_USERNAME";
pub const ENV_LOCAL_PATH: &str = "LOCAL_PATH";
pub const ENV_IGNORE_PATTERNS: &str = "IGNORE_PATTERNS";

/// Every variable the overlay reads.
pub const OVERRIDE_VARS: &[&str] = &[
    ENV_URL,
    ENV_API_TOKEN,
    ENV_SPACE_KEY,
    ENV_USERNAME,
    ENV_LOCAL_PATH,
    ENV_IGNORE_PATTERNS,
];

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment. A variable holding non-UTF-8 bytes is treated
/// as unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        match env::var(name) {
            Ok(value) => Some(value),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                tracing::debug!(var = name, "Ignoring environment variable with non-UTF-8 value");
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Returns the trimmed value of `name`, or `None` when unset or blank.
pub fn env_var_or_none<E: EnvSource + ?Sized>(source: &E, name: &str) -> Option<String> {
    let value = source.var(name)?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses `IGNORE_PATTERNS`: a JSON array of strings when the value starts
/// with `[`, otherwise a comma-separated list.
pub fn parse_ignore_patterns(value: &str) -> Result<Vec<String>, ConfigError> {
    let raw = value.trim();
    if raw.starts_with('[') {
        let parsed: Vec<String> = serde_json::from_str(raw).map_err(|err| {
            ConfigError::format(format!(
                "{ENV_IGNORE_PATTERNS} must be a JSON array of strings or a comma-separated list ({err})"
            ))
        })?;
        return Ok(clean_patterns(parsed));
    }

    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect())
}

/// Trims every pattern and drops the blank ones.
pub fn clean_patterns(patterns: Vec<String>) -> Vec<String> {
    patterns
        .into_iter()
        .map(|pattern| pattern.trim().to_string())
        .filter(|pattern| !pattern.is_empty())
        .collect()
}

/// Values taken from the environment, ready to be applied over a file config.
#[derive(Default, PartialEq)]
pub struct EnvOverrides {
    pub url: Option<String>,
    pub api_token: Option<String>,
    pub space_key: Option<String>,
    pub username: Option<String>,
    pub local_path: Option<String>,
    pub ignore_patterns: Option<Vec<String>>,
}

impl std::fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("url", &self.url)
            .field("api_token", &self.api_token.as_ref().map(|_| "********"))
            .field("space_key", &self.space_key)
            .field("username", &self.username)
            .field("local_path", &self.local_path)
            .field("ignore_patterns", &self.ignore_patterns)
            .finish()
    }
}

impl EnvOverrides {
    pub fn from_source<E: EnvSource + ?Sized>(source: &E) -> Result<Self, ConfigError> {
        let ignore_patterns = env_var_or_none(source, ENV_IGNORE_PATTERNS)
            .map(|value| parse_ignore_patterns(&value))
            .transpose()?;

        Ok(Self {
            url: env_var_or_none(source, ENV_URL),
            api_token: env_var_or_none(source, ENV_API_TOKEN),
            space_key: env_var_or_none(source, ENV_SPACE_KEY),
            username: env_var_or_none(source, ENV_USERNAME),
            local_path: env_var_or_none(source, ENV_LOCAL_PATH),
            ignore_patterns,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the variables that carried a value.
    pub fn applied_vars(&self) -> Vec<&'static str> {
        let present = [
            (ENV_URL, self.url.is_some()),
            (ENV_API_TOKEN, self.api_token.is_some()),
            (ENV_SPACE_KEY, self.space_key.is_some()),
            (ENV_USERNAME, self.username.is_some()),
            (ENV_LOCAL_PATH, self.local_path.is_some()),
            (ENV_IGNORE_PATTERNS, self.ignore_patterns.is_some()),
        ];
        present
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    /// Overwrites the file values with every override that is present.
    pub fn apply(self, raw: &mut RawConfig) {
        let Self {
            url,
            api_token,
            space_key,
            username,
            local_path,
            ignore_patterns,
        } = self;

        if url.is_some() || api_token.is_some() || space_key.is_some() || username.is_some() {
            let confluence = raw.confluence_mut();
            if url.is_some() {
                confluence.url = url;
            }
            if api_token.is_some() {
                confluence.api_token = api_token;
            }
            if space_key.is_some() {
                confluence.space_key = space_key;
            }
            if username.is_some() {
                confluence.username = username;
            }
        }

        if local_path.is_some() {
            raw.local_path = local_path;
        }
        if ignore_patterns.is_some() {
            raw.ignore_patterns = ignore_patterns;
        }
    }
}
