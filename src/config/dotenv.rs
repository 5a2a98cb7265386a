//! Best-effort `.env` loading for local development.
//!
//! Setting `DOTENV_DISABLED` to a truthy value skips the file entirely, which
//! keeps test runs independent of a developer's `.env`.

use std::env;
use std::path::PathBuf;

pub const DOTENV_DISABLED: &str = "DOTENV_DISABLED";

/// Loads `.env` into the process environment if one can be found.
///
/// Variables already present in the environment keep their values. Any
/// failure is logged and swallowed; returns the file that was loaded.
pub fn load_dotenv() -> Option<PathBuf> {
    if dotenv_disabled() {
        tracing::debug!("Skipping .env loading ({DOTENV_DISABLED} is set)");
        return None;
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded environment file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring unreadable environment file");
            None
        }
    }
}

fn dotenv_disabled() -> bool {
    env::var(DOTENV_DISABLED)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
