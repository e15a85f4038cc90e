//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Local config: `<dir>/.rstree.toml`
//! 4. Environment variables: `RSTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{TreeError, TreeResult};

/// How nodes are labelled when a tree is rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderSettings {
    /// Append the prefix as `[prefix]` when a node has one
    pub show_prefix: bool,
    /// Append the identity as `#abcd1234`
    pub show_identity: bool,
    /// Number of identity characters shown
    pub identity_width: usize,
    /// Label printed for a tree without head
    pub empty_label: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            show_prefix: true,
            show_identity: false,
            identity_width: 8,
            empty_label: "Empty tree".into(),
        }
    }
}

/// Unified configuration for rstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
}

pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rstree.toml")
}

impl Settings {
    /// Load settings with full precedence: defaults, global file, local file in
    /// `local_dir`, then `RSTREE_*` environment variables.
    pub fn load(local_dir: Option<&Path>) -> TreeResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("render.show_prefix", defaults.render.show_prefix)
            .map_err(config_err)?
            .set_default("render.show_identity", defaults.render.show_identity)
            .map_err(config_err)?
            .set_default(
                "render.identity_width",
                defaults.render.identity_width as i64,
            )
            .map_err(config_err)?
            .set_default("render.empty_label", defaults.render.empty_label.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                builder = builder.add_source(File::from(local_path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("RSTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> TreeResult<String> {
        toml::to_string_pretty(self).map_err(|e| TreeError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# rstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstree/rstree.toml
#   Local:  <dir>/.rstree.toml
#   Env:    RSTREE_* environment variables, e.g. RSTREE_RENDER__SHOW_IDENTITY=true

[render]
# Append node prefixes as "[prefix]"
# show_prefix = true

# Append node identities as "#abcd1234"
# show_identity = false

# Number of identity characters to show
# identity_width = 8

# Label for a tree without head node
# empty_label = "Empty tree"
"##
        .to_string()
    }
}

fn config_err(e: ConfigError) -> TreeError {
    TreeError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_render_settings_when_created_then_prefix_shown_identity_hidden() {
        let settings = Settings::default();
        assert!(settings.render.show_prefix);
        assert!(!settings.render.show_identity);
        assert_eq!(settings.render.identity_width, 8);
        assert_eq!(settings.render.empty_label, "Empty tree");
    }

    #[test]
    fn given_settings_when_serialized_then_toml_round_trips() {
        let settings = Settings::default();

        let toml = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&toml).expect("parse");

        assert!(toml.contains("[render]"));
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(parsed, Settings::default());
    }
}
