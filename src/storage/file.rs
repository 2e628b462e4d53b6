//! File-based storage backend.

use crate::error::{Error, Result};
use crate::storage::traits::KeyValueStore;
use std::fs;
use std::io;
use std::path::PathBuf;

/// File-based key/value backend with atomic writes.
///
/// Each key is a file under `<base_dir>/store/`.
#[derive(Debug)]
pub struct FileBackend {
    base_dir: PathBuf,
}

impl FileBackend {
    /// Create a new file backend.
    ///
    /// Creates the store directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(base_dir.join("store"))?;
        Ok(Self { base_dir })
    }

    /// Get the path to a key's file.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        // Keys become file names; anything path-like is refused
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage key: {key:?}"),
            )));
        }
        Ok(self.base_dir.join("store").join(key))
    }
}

impl KeyValueStore for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        let temp = path.with_extension("tmp");

        fs::write(&temp, value)?;

        // Atomic rename - a crash mid-write leaves the old value intact
        fs::rename(&temp, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_backend() -> (FileBackend, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        (backend, temp_dir)
    }

    #[test]
    fn creates_store_directory() {
        let temp_dir = TempDir::new().unwrap();
        let _backend = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        assert!(temp_dir.path().join("store").exists());
    }

    #[test]
    fn get_missing_key() {
        let (store, _temp) = create_test_backend();
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let (store, _temp) = create_test_backend();
        store.set("userId", "user_1234").unwrap();
        assert_eq!(store.get("userId").unwrap().as_deref(), Some("user_1234"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let (store, _temp) = create_test_backend();
        store.set("theme", "light").unwrap();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn atomic_write_creates_no_temp_file() {
        let (store, temp_dir) = create_test_backend();
        store.set("chatHistories", "[]").unwrap();

        let temp_path = temp_dir.path().join("store").join("chatHistories.tmp");
        assert!(!temp_path.exists());

        let main_path = temp_dir.path().join("store").join("chatHistories");
        assert!(main_path.exists());
    }

    #[test]
    fn remove_deletes_file() {
        let (store, temp_dir) = create_test_backend();
        store.set("apiUrl", "http://localhost:8000/api/ask").unwrap();

        let path = temp_dir.path().join("store").join("apiUrl");
        assert!(path.exists());

        store.remove("apiUrl").unwrap();
        assert!(!path.exists());
        assert!(store.get("apiUrl").unwrap().is_none());
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let (store, _temp) = create_test_backend();
        store.remove("nonexistent").unwrap();
    }

    #[test]
    fn rejects_path_like_keys() {
        let (store, _temp) = create_test_backend();
        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.remove("").is_err());
    }

    #[test]
    fn values_survive_a_new_backend_instance() {
        let (store, temp_dir) = create_test_backend();
        store.set("theme", "dark").unwrap();
        drop(store);

        let reopened = FileBackend::new(temp_dir.path().to_path_buf()).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
