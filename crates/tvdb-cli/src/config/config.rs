//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tvdb_api::tvdb::ClientOptions;

/// Environment variable overriding `tvdb.api_key`.
const ENV_API_KEY: &str = "TVDB_API_KEY";
/// Environment variable overriding `tvdb.user_key`.
const ENV_USER_KEY: &str = "TVDB_USER_KEY";
/// Environment variable overriding `tvdb.username`.
const ENV_USERNAME: &str = "TVDB_USERNAME";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// The TVDB client settings.
    #[serde(default)]
    pub tvdb: TvdbConfig,
}

/// The TVDB client configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TvdbConfig {
    /// API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// User key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_key: Option<String>,
    /// Username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Default response language (e.g. `"en"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// API base URL override (e.g. a local proxy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Overrides credentials with `TVDB_API_KEY`, `TVDB_USER_KEY` and
    /// `TVDB_USERNAME` when `env` returns a non-empty value.
    #[must_use]
    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
        if let Some(v) = lookup(ENV_API_KEY) {
            self.tvdb.api_key = Some(v);
        }
        if let Some(v) = lookup(ENV_USER_KEY) {
            self.tvdb.user_key = Some(v);
        }
        if let Some(v) = lookup(ENV_USERNAME) {
            self.tvdb.username = Some(v);
        }
        self
    }

    /// Client options from this config; missing fields are empty.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_key: self.tvdb.api_key.clone().unwrap_or_default(),
            user_key: self.tvdb.user_key.clone().unwrap_or_default(),
            username: self.tvdb.username.clone().unwrap_or_default(),
            language: self.tvdb.language.clone().unwrap_or_default(),
        }
    }

    /// Configured request timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.tvdb.timeout_secs.map(Duration::from_secs)
    }
}
