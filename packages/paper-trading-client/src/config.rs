//! Client configuration loaded from TOML with environment overrides.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_PATH_ENV: &str = "PAPER_TRADING_CONFIG";
/// Environment variable overriding `base_url`.
pub const BASE_URL_ENV: &str = "PAPER_TRADING_API_URL";
/// Environment variable overriding `token`.
pub const TOKEN_ENV: &str = "PAPER_TRADING_TOKEN";

/// Connection settings for [`crate::RestClient`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root; operation paths are appended to it
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Bearer token sent as `Authorization`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl ClientConfig {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("paper-trading/client.toml"))
            .unwrap_or_else(|| PathBuf::from("paper-trading.toml"))
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from_path(&Self::default_path())?.with_overrides(|key| env::var(key).ok()))
    }

    /// Load from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from a path the user named explicitly. A missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::load_from_path(path)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.token = Some(token);
        }
        self
    }
}
