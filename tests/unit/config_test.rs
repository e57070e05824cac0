//! Tests for configuration loading

use std::fs;

use expect_support::config::{CONFIG_ENV, ConfigError, SupportConfig};
use expect_support::{BasicObject, Features, MethodResolver, method_handle_for, method_resolver};
use serial_test::serial;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    (dir, path)
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn load_reads_features() {
    let (_dir, path) = write_config("[features]\nmodule_method_rebinding = false\n");
    let config = SupportConfig::load(&path).unwrap();
    assert_eq!(config.features, Features::without_rebinding());

    let resolver = MethodResolver::new(config.features);
    assert!(!resolver.features().module_method_rebinding);
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = SupportConfig::load(dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn load_invalid_file_is_parse_error() {
    let (_dir, path) = write_config("[features]\nmodule_method_rebinding = \"sometimes\"\n");
    let err = SupportConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_full_config() {
    let (_dir, path) = write_config(
        r#"
[features]
module_method_rebinding = true

[diff]
color = true
expected_label = "wanted"
actual_label = "found"

[warnings]
enabled = false
"#,
    );
    let config = SupportConfig::load(&path).unwrap();
    assert!(config.diff.color);
    assert_eq!(config.diff.expected_label, "wanted");
    assert_eq!(config.diff.actual_label, "found");
    assert!(!config.warnings.enabled);
}

// =============================================================================
// DISCOVERY
// =============================================================================

#[test]
#[serial(env)]
fn discover_honors_env_var() {
    let (_dir, path) = write_config("[warnings]\nenabled = false\n");
    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::set_var(CONFIG_ENV, &path) };

    assert_eq!(SupportConfig::discover_path(), Some(path));
    assert!(!SupportConfig::discover().warnings.enabled);

    // SAFETY: as above
    unsafe { std::env::remove_var(CONFIG_ENV) };
}

#[test]
#[serial(env)]
fn discover_falls_back_on_invalid_file() {
    let (_dir, path) = write_config("not = [valid");
    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::set_var(CONFIG_ENV, &path) };

    assert_eq!(SupportConfig::discover(), SupportConfig::default());

    // SAFETY: as above
    unsafe { std::env::remove_var(CONFIG_ENV) };
}

#[test]
#[serial(env)]
fn library_calls_never_discover_config() {
    let (_dir, path) = write_config("[features]\nmodule_method_rebinding = false\n\n[warnings]\nenabled = false\n");
    // SAFETY: serialized with every other test touching the environment
    unsafe { std::env::set_var(CONFIG_ENV, &path) };

    assert!(method_handle_for(&BasicObject::new("X"), "nope").is_err());
    assert_eq!(method_resolver().features(), Features::default());
    assert_eq!(Features::detect(), Features::default());
    assert!(SupportConfig::current().warnings.enabled);

    // SAFETY: as above
    unsafe { std::env::remove_var(CONFIG_ENV) };
}
