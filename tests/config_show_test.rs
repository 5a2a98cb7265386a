// Allow deprecated cargo_bin - the deprecation is for custom build-dir edge case
// which doesn't apply to this project. See: https://docs.rs/assert_cmd
#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use confluence_sync::config::env::OVERRIDE_VARS;
use predicates::prelude::*;

const CONFIG: &str = r#"
confluence:
  url: https://acme.atlassian.net
  api_token: s3cret
  space_key: ENG
local_path: handbook
ignore_patterns:
  - "*.tmp"
"#;

fn confluence_sync(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("confluence-sync").unwrap();
    cmd.current_dir(dir)
        .env("DOTENV_DISABLED", "1")
        .env_remove("CONFLUENCE_SYNC_CONFIG");
    for var in OVERRIDE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_config_show_prints_file_values_with_masked_token() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("confluence-sync.yml"), CONFIG).unwrap();

    confluence_sync(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("space_key: ENG"))
        .stdout(predicate::str::contains("local_path: handbook"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn test_config_show_reveal_prints_token() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("confluence-sync.yml"), CONFIG).unwrap();

    confluence_sync(temp.path())
        .args(["config", "show", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret"));
}

#[test]
fn test_config_show_json_output() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("confluence-sync.yml"), CONFIG).unwrap();

    confluence_sync(temp.path())
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"space_key\": \"ENG\""))
        .stdout(predicate::str::contains("\"local_path\": \"handbook\""));
}

#[test]
fn test_config_show_applies_env_overrides() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("confluence-sync.yml"), CONFIG).unwrap();

    confluence_sync(temp.path())
        .args(["config", "show", "--json"])
        .env("CONFLUENCE_SPACE_KEY", "OPS")
        .env("IGNORE_PATTERNS", r#"["*.log", "build/*"]"#)
        .assert()
        .success()
        .stderr(predicate::str::contains("Using environment overrides"))
        .stderr(predicate::str::contains("CONFLUENCE_SPACE_KEY"))
        .stdout(predicate::str::contains("\"space_key\": \"OPS\""))
        .stdout(predicate::str::contains("build/*"));
}

#[test]
fn test_config_show_without_file_uses_env() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args(["config", "show", "--json"])
        .env("CONFLUENCE_URL", "https://acme.atlassian.net")
        .env("CONFLUENCE_API_TOKEN", "s3cret")
        .env("CONFLUENCE_SPACE_KEY", "ENG")
        .assert()
        .success()
        .stderr(predicate::str::contains("No config file found"))
        .stdout(predicate::str::contains("\"local_path\": \"docs\""));
}

#[test]
fn test_config_show_fails_on_invalid_config() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}
