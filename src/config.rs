//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Local config: an explicit file passed by the caller
//! 4. Environment variables: `RSTREE_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or serializing settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Level at which refused restructures are reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SoftFailureLevel {
    #[default]
    Warn,
    Info,
    Debug,
    Off,
}

/// Diagnostics emitted by structural edits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Level for soft failures (ancestor swaps, anchors without parent, ...)
    pub soft_failure_level: SoftFailureLevel,
}

/// What a rendered tree shows for each node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LabelStyle {
    /// `to_content_string()` only
    #[default]
    Content,
    /// `node_name()` only
    NodeName,
    /// `Name: content`, or just `Name` when the content is empty
    Full,
}

/// Tree rendering options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RenderConfig {
    pub label: LabelStyle,
}

/// Unified configuration for rstree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub diagnostics: DiagnosticsConfig,
    pub render: RenderConfig,
}

/// Get the XDG config directory for rstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file that overrides the global one
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config (skipped when absent)
    /// 3. `local` (must exist when given)
    /// 4. `RSTREE_*` environment variables, e.g.
    ///    `RSTREE_DIAGNOSTICS__SOFT_FAILURE_LEVEL=off`
    pub fn load(local: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Self::defaults_builder()?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = local {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("RSTREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Load defaults plus a single file, ignoring global config and environment.
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        let settings = Self::defaults_builder()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        let defaults = Settings::default();
        let builder = Config::builder()
            .set_default(
                "diagnostics.soft_failure_level",
                level_name(defaults.diagnostics.soft_failure_level),
            )?
            .set_default("render.label", label_name(defaults.render.label))?;
        Ok(builder)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstree/rstree.toml
#   Local:  file passed to Settings::load
#   Env:    RSTREE_* environment variables (RSTREE_RENDER__LABEL=full)

[diagnostics]
# Level for refused edits: "warn", "info", "debug" or "off"
# soft_failure_level = "warn"

[render]
# Node label in rendered trees: "content", "node-name" or "full"
# label = "content"
"#
        .to_string()
    }
}

fn level_name(level: SoftFailureLevel) -> &'static str {
    match level {
        SoftFailureLevel::Warn => "warn",
        SoftFailureLevel::Info => "info",
        SoftFailureLevel::Debug => "debug",
        SoftFailureLevel::Off => "off",
    }
}

fn label_name(label: LabelStyle) -> &'static str {
    match label {
        LabelStyle::Content => "content",
        LabelStyle::NodeName => "node-name",
        LabelStyle::Full => "full",
    }
}
