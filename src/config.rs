//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/docnav/docnav.toml`
//! 3. Local config: `<project_dir>/.docnav.toml`
//! 4. Environment variables: `DOCNAV_*` prefix
//!
//! Command line flags (`--base-url`) are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ApplicationError;

/// Default location of `data.md` and the topic documents.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

/// Topic shown before anything is selected.
pub const DEFAULT_TOPIC: &str = "introduction.md";

/// Unified configuration for docnav.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// URL prefix of the documentation set, trailing slash expected
    pub base_url: String,
    /// File name shown when no topic is selected
    pub default_topic: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

/// Get the XDG config directory for docnav.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "docnav").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("docnav.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".docnav.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a `.docnav.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        let local = project_dir.map(local_config_path).filter(|p| p.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit config file locations.
    ///
    /// Missing layers are skipped; environment variables still apply.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)
            .map_err(config_err)?
            .set_default("default_topic", defaults.default_topic)
            .map_err(config_err)?;

        for path in [global, local].into_iter().flatten() {
            debug!("config layer: {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCNAV")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.validated()
    }

    /// Override the base URL (e.g. from `--base-url`).
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Result<Self, ApplicationError> {
        if let Some(url) = base_url {
            self.base_url = url.to_string();
        }
        self.validated()
    }

    fn validated(self) -> Result<Self, ApplicationError> {
        if self.base_url.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "base_url must not be empty".into(),
            });
        }
        if self.default_topic.trim().is_empty() {
            return Err(ApplicationError::Config {
                message: "default_topic must not be empty".into(),
            });
        }
        if !self.base_url.ends_with('/') {
            warn!(
                "base_url {:?} has no trailing slash, document URLs are built by plain concatenation",
                self.base_url
            );
        }
        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        format!(
            r#"# docnav configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/docnav/docnav.toml
#   Local:  <project_dir>/.docnav.toml
#   Env:    DOCNAV_* environment variables (e.g. DOCNAV_BASE_URL)
#   Flag:   --base-url

# Location of data.md and the topic documents (keep the trailing slash)
# base_url = "{DEFAULT_BASE_URL}"

# Topic shown before anything is selected
# default_topic = "{DEFAULT_TOPIC}"
"#
        )
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
