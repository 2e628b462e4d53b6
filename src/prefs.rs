//! User preferences kept in the key/value store.
//!
//! Effective values resolve as: command-line flag, stored preference,
//! configuration, built-in default.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::{KEY_API_URL, KEY_THEME, KEY_USER_ID, KeyValueStore};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::InvalidPreference(format!(
                "theme must be \"light\" or \"dark\", got {other:?}"
            ))),
        }
    }
}

/// A preference that can be set from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKey {
    /// `theme`
    Theme,
    /// `userId`
    UserId,
    /// `apiUrl`
    ApiUrl,
}

impl PrefKey {
    /// Storage key for this preference.
    #[must_use]
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Theme => KEY_THEME,
            Self::UserId => KEY_USER_ID,
            Self::ApiUrl => KEY_API_URL,
        }
    }
}

impl FromStr for PrefKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "theme" => Ok(Self::Theme),
            "userId" | "user-id" | "user_id" => Ok(Self::UserId),
            "apiUrl" | "api-url" | "api_url" => Ok(Self::ApiUrl),
            other => Err(Error::InvalidPreference(format!(
                "unknown preference {other:?} (expected theme, user-id or api-url)"
            ))),
        }
    }
}

/// Resolved preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Color theme.
    pub theme: Theme,
    /// User identifier sent with every query.
    pub user_id: String,
    /// Assistant endpoint.
    pub api_url: String,
}

impl Preferences {
    /// Resolve preferences from storage, falling back to `config`.
    ///
    /// A user id is generated and stored when neither storage nor config
    /// supplies one. An unreadable stored theme falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or a new user id cannot
    /// be saved.
    pub fn load(store: &dyn KeyValueStore, config: &Config) -> Result<Self> {
        let theme = match store.get(KEY_THEME)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let user_id = match non_blank(store.get(KEY_USER_ID)?).or_else(|| config.user.id.clone())
        {
            Some(id) => id,
            None => {
                let id = generate_user_id();
                store.set(KEY_USER_ID, &id)?;
                tracing::info!(user_id = %id, "generated user id");
                id
            }
        };

        let api_url = non_blank(store.get(KEY_API_URL)?).unwrap_or_else(|| config.api.url.clone());

        Ok(Self {
            theme,
            user_id,
            api_url,
        })
    }

    /// Apply command-line overrides for this run only.
    #[must_use]
    pub fn with_overrides(mut self, api_url: Option<&str>, user_id: Option<&str>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url.to_string();
        }
        if let Some(id) = user_id {
            self.user_id = id.to_string();
        }
        self
    }
}

/// Validate and store a preference.
///
/// # Errors
///
/// Returns an error for an invalid value or a storage failure.
pub fn set_preference(store: &dyn KeyValueStore, key: PrefKey, value: &str) -> Result<()> {
    let value = value.trim();
    let normalized = match key {
        PrefKey::Theme => value.parse::<Theme>()?.to_string(),
        PrefKey::UserId | PrefKey::ApiUrl if value.is_empty() => {
            return Err(Error::InvalidPreference(format!(
                "{} cannot be empty",
                key.storage_key()
            )));
        }
        PrefKey::UserId | PrefKey::ApiUrl => value.to_string(),
    };
    store.set(key.storage_key(), &normalized)
}

/// Remove a stored preference so the configured value applies again.
///
/// # Errors
///
/// Returns an error on storage failure.
pub fn reset_preference(store: &dyn KeyValueStore, key: PrefKey) -> Result<()> {
    store.remove(key.storage_key())
}

fn generate_user_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("user_{}", &hex[..8])
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_URL;
    use crate::storage::MemoryBackend;

    #[test]
    fn defaults_and_generated_user_id() {
        let store = MemoryBackend::new();
        let prefs = Preferences::load(&store, &Config::default()).unwrap();

        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.api_url, DEFAULT_API_URL);
        assert!(prefs.user_id.starts_with("user_"));
        assert_eq!(prefs.user_id.len(), "user_".len() + 8);

        // Generated id is stored and reused
        let again = Preferences::load(&store, &Config::default()).unwrap();
        assert_eq!(again.user_id, prefs.user_id);
    }

    #[test]
    fn stored_values_beat_config() {
        let store = MemoryBackend::new();
        store.set(KEY_THEME, "dark").unwrap();
        store.set(KEY_USER_ID, "alice").unwrap();
        store.set(KEY_API_URL, "https://help.example.com/api/ask").unwrap();

        let mut config = Config::default();
        config.user.id = Some("from-config".to_string());
        config.api.url = "http://config.invalid/api/ask".to_string();

        let prefs = Preferences::load(&store, &config).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.user_id, "alice");
        assert_eq!(prefs.api_url, "https://help.example.com/api/ask");
    }

    #[test]
    fn config_user_id_is_not_persisted() {
        let store = MemoryBackend::new();
        let mut config = Config::default();
        config.user.id = Some("from-config".to_string());

        let prefs = Preferences::load(&store, &config).unwrap();
        assert_eq!(prefs.user_id, "from-config");
        assert!(store.get(KEY_USER_ID).unwrap().is_none());
    }

    #[test]
    fn bad_stored_theme_falls_back() {
        let store = MemoryBackend::new();
        store.set(KEY_THEME, "solarized").unwrap();
        let prefs = Preferences::load(&store, &Config::default()).unwrap();
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn overrides_apply() {
        let store = MemoryBackend::new();
        let prefs = Preferences::load(&store, &Config::default())
            .unwrap()
            .with_overrides(Some("http://127.0.0.1:9000/api/ask"), Some("bob"));
        assert_eq!(prefs.api_url, "http://127.0.0.1:9000/api/ask");
        assert_eq!(prefs.user_id, "bob");
    }

    #[test]
    fn set_preference_validates_theme() {
        let store = MemoryBackend::new();
        set_preference(&store, PrefKey::Theme, "DARK").unwrap();
        assert_eq!(store.get(KEY_THEME).unwrap().as_deref(), Some("dark"));

        let err = set_preference(&store, PrefKey::Theme, "blue").unwrap_err();
        assert!(matches!(err, Error::InvalidPreference(_)));
    }

    #[test]
    fn set_preference_rejects_empty_values() {
        let store = MemoryBackend::new();
        assert!(set_preference(&store, PrefKey::UserId, "  ").is_err());
        assert!(set_preference(&store, PrefKey::ApiUrl, "").is_err());
    }

    #[test]
    fn reset_preference_restores_fallback() {
        let store = MemoryBackend::new();
        set_preference(&store, PrefKey::ApiUrl, "http://other/api/ask").unwrap();
        reset_preference(&store, PrefKey::ApiUrl).unwrap();
        let prefs = Preferences::load(&store, &Config::default()).unwrap();
        assert_eq!(prefs.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn pref_key_accepts_aliases() {
        assert_eq!("userId".parse::<PrefKey>().unwrap(), PrefKey::UserId);
        assert_eq!("api-url".parse::<PrefKey>().unwrap(), PrefKey::ApiUrl);
        assert!("colour".parse::<PrefKey>().is_err());
    }
}
