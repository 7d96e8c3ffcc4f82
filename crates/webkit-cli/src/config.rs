//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `WEBKIT_`-prefixed environment variables, e.g. `WEBKIT_OUTPUT__FORMAT=json`
//! 3. Config file (`--config`, else the platform config dir, else `.webkit.toml`)
//! 4. Built-in defaults

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Project-local config file, read when no platform config file exists.
pub const LOCAL_CONFIG_FILE: &str = ".webkit.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Project location.
    pub project: ProjectConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Directory holding `app.json`, used when `--dir` is absent.
    pub root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                no_color: false,
                format: OutputFormat::Auto,
            },
            project: ProjectConfig {
                root: PathBuf::from("."),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// An explicit `config_file` must exist; the default locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Self::defaults_builder()?;

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => {
                let global = Self::config_path();
                let path = if global.exists() {
                    global
                } else {
                    PathBuf::from(LOCAL_CONFIG_FILE)
                };
                builder.add_source(File::from(path).required(false))
            }
        };

        builder
            .add_source(
                Environment::with_prefix("WEBKIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Load from a single file with no environment overrides.
    #[cfg(test)]
    fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        Self::defaults_builder()?
            .add_source(File::from(path).required(true))
            .build()
            .with_context(|| format!("Failed to read {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn defaults_builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Self::default();
        Ok(Config::builder()
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", "auto")?
            .set_default(
                "project.root",
                defaults.project.root.to_string_lossy().into_owned(),
            )?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.webkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "ainsley", "webkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Dotted-key lookup used by `webkit config get`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(
                serde_json::to_value(self.output.format)
                    .ok()?
                    .as_str()?
                    .to_owned(),
            ),
            "project.root" => Some(self.project.root.display().to_string()),
            _ => None,
        }
    }

    /// Every key accepted by [`Self::get`].
    pub const KEYS: [&'static str; 3] = ["output.no_color", "output.format", "project.root"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let cfg = AppConfig::default();
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, OutputFormat::Auto);
        assert_eq!(cfg.project.root, PathBuf::from("."));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nformat = \"json\"\n\n[project]\nroot = \"site\"").unwrap();

        let cfg = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.project.root, PathBuf::from("site"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here/webkit.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn bad_value_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nformat = \"fancy\"").unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("output.format").as_deref(), Some("auto"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("project.root").as_deref(), Some("."));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
