//! Integration tests for the expect-support CLI
//!
//! Runs the binary against temporary config files and checks both output
//! modes.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper function to create an expect-support command
fn expect_support() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("expect-support"));
    cmd.env_remove("EXPECT_SUPPORT_CONFIG");
    cmd
}

/// Write a config file into a fresh temp dir
fn config_file(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

// =============================================================================
// VERSION
// =============================================================================

#[test]
fn test_version_human() {
    expect_support()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("expect-support v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_json() {
    let output = expect_support().args(["--json", "version"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_no_command_prints_version() {
    expect_support()
        .assert()
        .success()
        .stdout(predicate::str::starts_with("expect-support v"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_from_path() {
    let (_dir, path) = config_file("[diff]\nactual_label = \"got\"\n");
    expect_support()
        .args(["config", "--path"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("# source:"))
        .stdout(predicate::str::contains("actual_label = \"got\""));
}

#[test]
fn test_config_json() {
    let (_dir, path) = config_file("[warnings]\nenabled = false\n");
    let output = expect_support()
        .args(["--json", "config", "--path"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["warnings"]["enabled"], false);
    assert_eq!(json["config"]["features"]["module_method_rebinding"], true);
    assert!(json["source"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn test_config_env_var() {
    let (_dir, path) = config_file("[diff]\ncolor = true\n");
    expect_support()
        .env("EXPECT_SUPPORT_CONFIG", &path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("color = true"));
}

#[test]
fn test_config_invalid_path_fails() {
    let (_dir, path) = config_file("[features]\nbogus = 1\n");
    expect_support()
        .args(["config", "--path"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not load"));
}

// =============================================================================
// FEATURES
// =============================================================================

#[test]
fn test_features_default_order() {
    let (_dir, path) = config_file("");
    expect_support()
        .args(["features", "--path"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("module_method_rebinding: true"))
        .stdout(predicate::str::contains("1. root lookup"))
        .stdout(predicate::str::contains("2. own lookup"));
}

#[test]
fn test_features_without_rebinding_json() {
    let (_dir, path) = config_file("[features]\nmodule_method_rebinding = false\n");
    let output = expect_support()
        .args(["--json", "features", "--path"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["module_method_rebinding"], false);
    assert_eq!(
        json["resolution_order"][0],
        "root lookup (root mixin only), else own lookup"
    );
    assert_eq!(json["resolution_order"][1], "own lookup");
}
