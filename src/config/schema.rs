//! Configuration records and their defaults.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "confluence-sync.yml";

/// Local markdown directory used when neither file nor environment sets one.
pub const DEFAULT_LOCAL_PATH: &str = "docs";

pub const TEMPLATE_URL: &str = "https://your-domain.atlassian.net";
pub const TEMPLATE_API_TOKEN: &str = "your-api-token";
pub const TEMPLATE_SPACE_KEY: &str = "YOUR_SPACE_KEY";

/// Ignore patterns written by `config init`.
pub const TEMPLATE_IGNORE_PATTERNS: &[&str] = &["*.tmp", ".git/*"];

/// Ignore patterns written by `config setup`.
pub const SETUP_IGNORE_PATTERNS: &[&str] = &["*.tmp", ".git/*", ".DS_Store"];

const MASKED_SECRET: &str = "********";

/// Root settings record produced by a successful load.
///
/// Example:
/// ```yaml
/// confluence:
///   url: https://example.atlassian.net
///   api_token: secret
///   space_key: DOCS
/// local_path: docs
/// ignore_patterns:
///   - "*.tmp"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncSettings {
    /// Connection settings for the remote space.
    pub confluence: ConfluenceSettings,
    /// Directory holding the markdown files.
    /// Example: local_path: docs
    pub local_path: PathBuf,
    /// Patterns skipped during sync, in file order.
    /// Example: ignore_patterns: ["*.tmp", ".git/*"]
    pub ignore_patterns: Vec<String>,
}

impl SyncSettings {
    /// Placeholder document written by `save_template`.
    pub fn template() -> Self {
        Self {
            confluence: ConfluenceSettings {
                url: TEMPLATE_URL.to_string(),
                api_token: TEMPLATE_API_TOKEN.to_string(),
                space_key: TEMPLATE_SPACE_KEY.to_string(),
                username: None,
            },
            local_path: PathBuf::from(DEFAULT_LOCAL_PATH),
            ignore_patterns: to_owned_patterns(TEMPLATE_IGNORE_PATTERNS),
        }
    }

    /// Copy with the API token masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.confluence.api_token = MASKED_SECRET.to_string();
        copy
    }
}

/// Confluence connection settings.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfluenceSettings {
    /// Base URL of the Confluence instance.
    /// Example: url: https://example.atlassian.net
    pub url: String,
    /// API token used for authentication.
    pub api_token: String,
    /// Key of the space being synced.
    /// Example: space_key: DOCS
    pub space_key: String,
    /// Username for legacy basic authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl fmt::Debug for ConfluenceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfluenceSettings")
            .field("url", &self.url)
            .field("api_token", &MASKED_SECRET)
            .field("space_key", &self.space_key)
            .field("username", &self.username)
            .finish()
    }
}

/// Un-validated configuration as read from the file and overlaid from the
/// environment. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawConfig {
    pub confluence: Option<RawConfluence>,
    pub local_path: Option<String>,
    pub ignore_patterns: Option<Vec<String>>,
}

#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawConfluence {
    pub url: Option<String>,
    pub api_token: Option<String>,
    pub space_key: Option<String>,
    pub username: Option<String>,
}

impl fmt::Debug for RawConfluence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfluence")
            .field("url", &self.url)
            .field("api_token", &self.api_token.as_ref().map(|_| MASKED_SECRET))
            .field("space_key", &self.space_key)
            .field("username", &self.username)
            .finish()
    }
}

impl RawConfig {
    /// The `confluence` section, created empty if the file had none.
    pub fn confluence_mut(&mut self) -> &mut RawConfluence {
        self.confluence.get_or_insert_with(RawConfluence::default)
    }
}

pub(crate) fn to_owned_patterns(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|pattern| pattern.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_placeholder_values() {
        let template = SyncSettings::template();
        assert_eq!(template.confluence.url, "https://your-domain.atlassian.net");
        assert_eq!(template.confluence.api_token, "your-api-token");
        assert_eq!(template.confluence.space_key, "YOUR_SPACE_KEY");
        assert_eq!(template.local_path, PathBuf::from("docs"));
        assert_eq!(template.ignore_patterns, vec!["*.tmp", ".git/*"]);
    }

    #[test]
    fn debug_output_hides_api_token() {
        let mut settings = SyncSettings::template();
        settings.confluence.api_token = "super-secret".to_string();
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains(MASKED_SECRET));
    }

    #[test]
    fn redacted_masks_only_the_token() {
        let settings = SyncSettings::template();
        let redacted = settings.redacted();
        assert_eq!(redacted.confluence.api_token, MASKED_SECRET);
        assert_eq!(redacted.confluence.url, settings.confluence.url);
    }

    #[test]
    fn username_is_omitted_when_absent() {
        let yaml = serde_yaml::to_string(&SyncSettings::template()).unwrap();
        assert!(!yaml.contains("username"));
    }

    #[test]
    fn raw_config_ignores_unknown_keys() {
        let raw: RawConfig = serde_yaml::from_str(
            "confluence:\n  url: https://a.example\n  extra: 1\nsync_mode: full\n",
        )
        .unwrap();
        assert_eq!(
            raw.confluence.unwrap().url.as_deref(),
            Some("https://a.example")
        );
    }
}
