//! Configuration management module.

pub mod dotenv;
pub mod env;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use dotenv::load_dotenv;
pub use env::{EnvOverrides, EnvSource, ProcessEnv, env_var_or_none, parse_ignore_patterns};
pub use error::ConfigError;
pub use loader::{ConfigLoader, parse_config, read_config_file};
pub use schema::{
    ConfluenceSettings, DEFAULT_CONFIG_FILE, DEFAULT_LOCAL_PATH, RawConfig, RawConfluence,
    SyncSettings,
};
pub use validation::{ValidationError, ValidationWarning, check_settings, validate_config};
