//! CLI command implementations.

pub mod ask;
pub mod chat;
pub mod clear;
pub mod delete;
pub mod export;
pub mod health;
pub mod list;
pub mod prefs;
pub mod render;
pub mod show;

use crate::config::Config;
use crate::error::Result;
use crate::prefs::Preferences;
use crate::storage::FileBackend;

/// Per-run overrides from global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Endpoint URL for this run.
    pub api_url: Option<String>,
    /// User id for this run.
    pub user_id: Option<String>,
}

/// Everything a command needs: configuration, storage and overrides.
#[derive(Debug)]
pub struct Context {
    /// Loaded configuration.
    pub config: Config,
    /// Durable key/value store under the configured home.
    pub store: FileBackend,
    /// Flags that beat stored preferences.
    pub overrides: Overrides,
}

impl Context {
    /// Open storage at the configured path.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage directory cannot be created.
    pub fn new(config: Config, overrides: Overrides) -> Result<Self> {
        let store = FileBackend::new(config.storage.path.clone())?;
        Ok(Self {
            config,
            store,
            overrides,
        })
    }

    /// Resolve effective preferences for this run.
    ///
    /// # Errors
    ///
    /// Returns an error if preferences cannot be read or initialized.
    pub fn preferences(&self) -> Result<Preferences> {
        Ok(Preferences::load(&self.store, &self.config)?.with_overrides(
            self.overrides.api_url.as_deref(),
            self.overrides.user_id.as_deref(),
        ))
    }
}
