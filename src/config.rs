//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`DESKCHAT_*`)
//! 2. Config file (`~/.deskchat/config.toml`)
//! 3. Defaults
//!
//! Values stored as preferences (see [`crate::prefs`]) take priority over
//! anything here; this only supplies the fallbacks.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default assistant endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/ask";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Remote endpoint configuration.
    pub api: ApiConfig,

    /// User identity configuration.
    pub user: UserConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the deskchat home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_home(),
        }
    }
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL of the ask endpoint.
    pub url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// User identity configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UserConfig {
    /// Fixed user id. When unset, one is generated and stored on first use.
    pub id: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Get the default deskchat home directory.
///
/// Uses `DESKCHAT_HOME` if set, otherwise `~/.deskchat`.
#[must_use]
pub fn default_home() -> PathBuf {
    if let Ok(home) = env::var("DESKCHAT_HOME") {
        return PathBuf::from(home);
    }
    dirs::home_dir().map_or_else(|| PathBuf::from(".deskchat"), |h| h.join(".deskchat"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be read or parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = parse_config(&contents)?;
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns an error if the document is not valid TOML for [`Config`].
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("DESKCHAT_CONFIG") {
        return PathBuf::from(path);
    }
    default_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    if let Ok(path) = env::var("DESKCHAT_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("DESKCHAT_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    if let Ok(url) = env::var("DESKCHAT_API_URL") {
        if !url.trim().is_empty() {
            config.api.url = url;
        }
    }

    if let Ok(id) = env::var("DESKCHAT_USER_ID") {
        if !id.trim().is_empty() {
            config.user.id = Some(id);
        }
    }

    if let Ok(level) = env::var("DESKCHAT_LOG") {
        config.logging.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.api.url, DEFAULT_API_URL);
        assert!(config.user.id.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
            [storage]
            path = "/tmp/deskchat-test"

            [api]
            url = "https://support.example.com/api/ask"

            [user]
            id = "user_42"

            [logging]
            level = "debug"
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/deskchat-test"));
        assert_eq!(config.api.url, "https://support.example.com/api/ask");
        assert_eq!(config.user.id.as_deref(), Some("user_42"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let toml = r#"
            [user]
            id = "someone"
        "#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.user.id.as_deref(), Some("someone"));
        assert_eq!(config.api.url, DEFAULT_API_URL); // Default
        assert_eq!(config.logging.level, "warn"); // Default
    }

    #[test]
    fn invalid_config_is_an_error() {
        let result = parse_config("[api]\nurl = 12");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
