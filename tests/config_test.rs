//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only).

use std::fs;

use tempfile::TempDir;

use rstree::config::{local_config_path, Settings};

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.render.empty_label, "Empty tree");
    assert_eq!(settings.render.identity_width, 8);
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let local = r#"
[render]
show_identity = true
identity_width = 12
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert!(settings.render.show_identity);
    assert_eq!(settings.render.identity_width, 12);
    // Unspecified fields keep their defaults
    assert!(settings.render.show_prefix);
    assert_eq!(settings.render.empty_label, "Empty tree");
}

#[test]
fn given_invalid_local_config_when_load_then_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[render]\nidentity_width = \"wide\"\n",
    )
    .unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(result.is_err());
}
