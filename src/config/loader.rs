//! Config file loading and writing.
//!
//! A load reads the YAML file (a missing file is an empty config), applies the
//! environment overlay, then validates the result into [`SyncSettings`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::dotenv::load_dotenv;
use crate::config::env::{EnvOverrides, EnvSource, ProcessEnv};
use crate::config::error::ConfigError;
use crate::config::schema::{
    ConfluenceSettings, DEFAULT_CONFIG_FILE, DEFAULT_LOCAL_PATH, RawConfig,
    SETUP_IGNORE_PATTERNS, SyncSettings, to_owned_patterns,
};
use crate::config::validation::{check_settings, validate_config};

const CONFIG_HEADER: &str = "# confluence-sync configuration file\n";

/// Loads, caches and writes the sync configuration for one config path.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: PathBuf,
    settings: Option<SyncSettings>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConfigLoader {
    /// Creates a loader for `config_path`, or `confluence-sync.yml` in the
    /// working directory.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            settings: None,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Settings from the last successful load, if any.
    pub fn cached(&self) -> Option<&SyncSettings> {
        self.settings.as_ref()
    }

    /// Loads `.env`, then the config file with environment overrides, and
    /// caches the validated result.
    pub fn load(&mut self) -> Result<&SyncSettings, ConfigError> {
        load_dotenv();
        self.load_with_env(&ProcessEnv)
    }

    /// Same as [`ConfigLoader::load`] against an explicit environment, without
    /// touching `.env`.
    pub fn load_with_env<E: EnvSource + ?Sized>(
        &mut self,
        env: &E,
    ) -> Result<&SyncSettings, ConfigError> {
        let settings = self.resolve(env)?;
        Ok(&*self.settings.insert(settings))
    }

    /// Cached settings, loading them on first access.
    pub fn config(&mut self) -> Result<&SyncSettings, ConfigError> {
        let settings = match self.settings.take() {
            Some(settings) => settings,
            None => {
                load_dotenv();
                self.resolve(&ProcessEnv)?
            }
        };
        Ok(&*self.settings.insert(settings))
    }

    /// Drops the cached settings and loads them again.
    pub fn reload(&mut self) -> Result<&SyncSettings, ConfigError> {
        self.settings = None;
        self.load()
    }

    /// Writes the placeholder config, replacing any existing file.
    pub fn save_template(&self) -> Result<(), ConfigError> {
        write_config(&self.config_path, &SyncSettings::template())?;
        tracing::info!(path = %self.config_path.display(), "Wrote config template");
        Ok(())
    }

    /// Writes a config built from interactive answers.
    ///
    /// `local_path` defaults to `docs`; `username` is written only when
    /// non-empty. Values are not validated here.
    pub fn save_interactive_config(
        &self,
        url: &str,
        api_token: &str,
        space_key: &str,
        local_path: Option<&Path>,
        username: Option<&str>,
    ) -> Result<(), ConfigError> {
        let settings = SyncSettings {
            confluence: ConfluenceSettings {
                url: url.to_string(),
                api_token: api_token.to_string(),
                space_key: space_key.to_string(),
                username: username
                    .filter(|name| !name.trim().is_empty())
                    .map(str::to_string),
            },
            local_path: local_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_PATH)),
            ignore_patterns: to_owned_patterns(SETUP_IGNORE_PATTERNS),
        };

        write_config(&self.config_path, &settings)?;
        tracing::info!(path = %self.config_path.display(), "Saved interactive configuration");
        Ok(())
    }

    fn resolve<E: EnvSource + ?Sized>(&self, env: &E) -> Result<SyncSettings, ConfigError> {
        let mut raw = read_config_file(&self.config_path)?;

        let overrides = EnvOverrides::from_source(env)?;
        if !overrides.is_empty() {
            tracing::debug!(vars = ?overrides.applied_vars(), "Applying environment overrides");
        }
        overrides.apply(&mut raw);

        let settings = validate_config(raw).map_err(|errors| ConfigError::Validation { errors })?;
        for warning in check_settings(&settings) {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }
        Ok(settings)
    }
}

/// Reads and parses the config file; a missing file yields an empty config.
pub fn read_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file found");
        return Ok(RawConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

/// Parses YAML config text. The top level must be a mapping; an empty
/// document counts as an empty mapping.
pub fn parse_config(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(RawConfig::default());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        serde_yaml::Value::Null => Ok(RawConfig::default()),
        serde_yaml::Value::Mapping(_) => serde_yaml::from_value(value).map_err(|err| {
            ConfigError::format(format!("Invalid config in {}: {err}", path.display()))
        }),
        other => Err(ConfigError::format(format!(
            "Config file must contain a YAML mapping, found {}: {}",
            yaml_kind(&other),
            path.display()
        ))),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a list",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

fn write_config(path: &Path, settings: &SyncSettings) -> Result<(), ConfigError> {
    let body = serde_yaml::to_string(settings)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, format!("{CONFIG_HEADER}{body}")).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    set_file_permissions(path);
    Ok(())
}

fn set_file_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
            tracing::warn!(path = %path.display(), error = %err, "Failed to restrict config file permissions");
        }
    }
}
