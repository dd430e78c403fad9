use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, TeamboxError};

/// Name of the configuration file stored inside the `teambox` config directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the directory (under the platform config dir) holding the config.
pub const CONFIG_DIR: &str = "teambox";

/// Hosted Teambox service used when no `base_url` is configured.
pub const DEFAULT_BASE_URL: &str = "https://teambox.com";

/// Configuration for a Teambox client.
///
/// Controls where requests go, how they authenticate and whether
/// objects/references responses are materialized into linked records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL of the Teambox installation.
    pub base_url: String,
    /// API version segment inserted after `/api/`.
    pub api_version: String,
    /// Username for HTTP Basic auth.
    pub username: Option<String>,
    /// Password for HTTP Basic auth.
    pub password: Option<String>,
    /// Request timeout in seconds, applied to the whole call.
    pub timeout_secs: u64,
    /// Whether objects/references responses are turned into linked records.
    /// When disabled, parsed bodies are handed back untouched.
    pub materialize_responses: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: "1".to_string(),
            username: None,
            password: None,
            timeout_secs: 30,
            materialize_responses: true,
        }
    }
}

impl ClientConfig {
    /// Returns the root URL every resource path is appended to,
    /// e.g. `https://teambox.com/api/1`.
    pub fn api_root(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Overrides connection settings from `TEAMBOX_BASE_URL`,
    /// `TEAMBOX_USERNAME` and `TEAMBOX_PASSWORD` when they are set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TEAMBOX_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(user) = std::env::var("TEAMBOX_USERNAME") {
            self.username = Some(user);
        }
        if let Ok(pass) = std::env::var("TEAMBOX_PASSWORD") {
            self.password = Some(pass);
        }
    }
}

/// Returns the default config location, `<config dir>/teambox/config.json`.
///
/// Falls back to the current directory when the platform has no config dir.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILENAME)
}

/// Loads the configuration from disk.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(config_path: &Path) -> Result<ClientConfig> {
    if !config_path.exists() {
        return Ok(ClientConfig::default());
    }

    let contents = fs::read_to_string(config_path).map_err(|e| TeamboxError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: ClientConfig =
        serde_json::from_str(&contents).map_err(|e| TeamboxError::Config {
            message: format!(
                "failed to parse config file '{}': {}",
                config_path.display(),
                e
            ),
        })?;

    Ok(config)
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it into place, so a
/// partial write never corrupts the configuration.
pub fn save_config(config_path: &Path, config: &ClientConfig) -> Result<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| TeamboxError::Config {
            message: format!(
                "failed to create config directory '{}': {}",
                parent.display(),
                e
            ),
        })?;
    }

    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| TeamboxError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| TeamboxError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, config_path).map_err(|e| TeamboxError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
