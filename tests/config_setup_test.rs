// Allow deprecated cargo_bin - the deprecation is for custom build-dir edge case
// which doesn't apply to this project. See: https://docs.rs/assert_cmd
#![allow(deprecated)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use confluence_sync::config::env::OVERRIDE_VARS;
use predicates::prelude::*;

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
fn test_config_setup_writes_given_values() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args([
            "config",
            "setup",
            "--url",
            "https://acme.atlassian.net",
            "--api-token",
            "s3cret",
            "--space-key",
            "ENG",
            "--local-path",
            "handbook",
            "--username",
            "writer@acme.test",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config saved to"));

    let contents = fs::read_to_string(temp.path().join("confluence-sync.yml")).unwrap();
    assert!(contents.contains("acme.atlassian.net"));
    assert!(contents.contains("s3cret"));
    assert!(contents.contains("ENG"));
    assert!(contents.contains("handbook"));
    assert!(contents.contains("writer@acme.test"));
    assert!(contents.contains(".DS_Store"));
}

#[test]
fn test_config_setup_output_validates() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args([
            "config",
            "setup",
            "--url",
            "https://acme.atlassian.net",
            "--api-token",
            "s3cret",
            "--space-key",
            "ENG",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(temp.path().join("confluence-sync.yml")).unwrap();
    assert!(!contents.contains("username"));
    assert!(contents.contains("local_path: docs"));

    confluence_sync(temp.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration valid"))
        .stdout(predicate::str::contains("Configuration warnings").not());
}

#[test]
fn test_config_setup_rejects_blank_required_value() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args([
            "config",
            "setup",
            "--url",
            "https://acme.atlassian.net",
            "--api-token",
            "  ",
            "--space-key",
            "ENG",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration errors"))
        .stderr(predicate::str::contains("api_token"));

    assert!(!temp.path().join("confluence-sync.yml").exists());
}

#[test]
fn test_config_setup_declined_overwrite_keeps_file() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("confluence-sync.yml");
    fs::write(&config_path, "existing").unwrap();

    confluence_sync(temp.path())
        .args([
            "config",
            "setup",
            "--url",
            "https://acme.atlassian.net",
            "--api-token",
            "s3cret",
            "--space-key",
            "ENG",
        ])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "existing");
}

#[test]
fn test_config_setup_trims_answers_before_writing() {
    let temp = tempfile::tempdir().unwrap();

    confluence_sync(temp.path())
        .args([
            "config",
            "setup",
            "--url",
            " https://acme.atlassian.net ",
            "--api-token",
            "s3cret ",
            "--space-key",
            "ENG",
            "--local-path",
            "  handbook ",
        ])
        .assert()
        .success();

    let contents = fs::read_to_string(temp.path().join("confluence-sync.yml")).unwrap();
    assert!(contents.contains("local_path: handbook\n"));
    assert!(contents.contains("api_token: s3cret\n"));
}
