//! Environment overrides live in their own test binary so the variables cannot leak
//! into other config tests running in parallel.

use std::env;
use std::fs;

use tempfile::TempDir;

use rstree::config::{local_config_path, Settings};

#[test]
fn given_env_var_and_local_config_when_load_then_env_wins() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[render]\nshow_identity = false\nempty_label = \"local\"\n",
    )
    .unwrap();
    env::set_var("RSTREE_RENDER__SHOW_IDENTITY", "true");

    // Act
    let settings = Settings::load(Some(dir.path()));
    env::remove_var("RSTREE_RENDER__SHOW_IDENTITY");
    let settings = settings.expect("load settings");

    // Assert
    assert!(settings.render.show_identity);
    assert_eq!(settings.render.empty_label, "local");
}
