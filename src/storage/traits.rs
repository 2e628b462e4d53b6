//! Storage trait definitions.

use crate::error::Result;

/// Key under which the chat history collection is stored.
pub const KEY_CHAT_HISTORIES: &str = "chatHistories";

/// Key for the theme preference.
pub const KEY_THEME: &str = "theme";

/// Key for the user identifier preference.
pub const KEY_USER_ID: &str = "userId";

/// Key for the endpoint URL preference.
pub const KEY_API_URL: &str = "apiUrl";

/// Durable string key/value storage.
///
/// Values are opaque strings; callers own their encoding.
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&self, key: &str) -> Result<()>;
}
