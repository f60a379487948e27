//! Configuration module for prevue
//!
//! Two layers live here:
//! - [`Settings`]: runtime settings (rule file location, shell override)
//!   assembled with the `config` crate from `PREVUE_*` environment
//!   variables and command-line overrides.
//! - [`RuleDocument`]: the user's YAML rule file, seeded from an embedded
//!   template on first use.

mod document;

pub use document::{RawConfigValue, RuleDocument};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use log::info;
use serde::Deserialize;

use crate::PrevueError;
use crate::exec::Shell;

/// Directory name under the user's config directory
pub const APP_NAME: &str = "prevue";

/// Rule file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment variables read into [`Settings`]
pub const ENV_PREFIX: &str = "PREVUE";

/// Rule file written on first run
pub const DEFAULT_TEMPLATE: &str = include_str!("default.yaml");

/// Runtime settings
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Rule file path; defaults to [`default_config_path`]
    #[serde(default)]
    pub config: Option<PathBuf>,

    /// Shell used to run commands; overrides `$SHELL`
    #[serde(default)]
    pub shell: Option<String>,
}

impl Settings {
    /// Load settings from the process environment plus a CLI override.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings sources cannot be merged or deserialized.
    pub fn load(cli_config: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX), cli_config)
    }

    /// Load settings from an explicit environment source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the settings sources cannot be merged or deserialized.
    pub fn load_from(env: Environment, cli_config: Option<PathBuf>) -> Result<Self, ConfigError> {
        let cli_config = cli_config.map(|path| path.to_string_lossy().into_owned());

        Config::builder()
            .add_source(env)
            .set_override_option("config", cli_config)?
            .build()?
            .try_deserialize()
    }

    /// Rule file location: the configured path, else the per-user default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system config
    /// directory cannot be determined.
    pub fn rules_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }

    /// Shell to run commands with: the override, then `login_shell`, then `/bin/sh`.
    #[must_use]
    pub fn shell(&self, login_shell: Option<String>) -> Shell {
        Shell::resolve([self.shell.clone(), login_shell])
    }
}

/// Get the default path of the rule file
///
/// # Errors
///
/// Returns `ConfigError` if the system config directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

    Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Seeds a missing rule file from a template
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap<'a> {
    template: &'a str,
}

impl<'a> Bootstrap<'a> {
    #[must_use]
    pub const fn new(template: &'a str) -> Self {
        Self { template }
    }

    #[must_use]
    pub const fn template(&self) -> &'a str {
        self.template
    }

    /// Write the template to `path` unless something already exists there.
    ///
    /// Returns `true` when the file was created. Concurrent first runs may
    /// both write; the content is identical so the last writer wins.
    ///
    /// # Errors
    ///
    /// Returns an `io::Error` if the directory or file cannot be created.
    pub fn ensure(&self, path: &Path) -> io::Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.template)?;
        Ok(true)
    }
}

impl Default for Bootstrap<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// Read the rule file at `path`, seeding it first if it does not exist.
///
/// # Errors
///
/// Returns `PrevueError::Io` if the file cannot be created or read and
/// `PrevueError::Rules` if its content is malformed.
pub fn load_rules(path: &Path, bootstrap: &Bootstrap<'_>) -> Result<RuleDocument, PrevueError> {
    let with_path = |e: io::Error| {
        io::Error::new(e.kind(), format!("{}: {e}", path.display()))
    };

    if bootstrap.ensure(path).map_err(with_path)? {
        info!("created default configuration at {}", path.display());
    }

    let text = fs::read_to_string(path).map_err(with_path)?;
    RuleDocument::parse(&text).map_err(|source| PrevueError::Rules {
        path: path.to_path_buf(),
        source,
    })
}
