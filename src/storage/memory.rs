//! In-memory storage backend for testing.

use crate::error::Result;
use crate::storage::traits::KeyValueStore;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key/value backend for testing.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().unwrap();
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key() {
        let store = MemoryBackend::new();
        assert!(store.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn set_and_get() {
        let store = MemoryBackend::new();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn remove_key() {
        let store = MemoryBackend::new();
        store.set("userId", "user_1").unwrap();
        store.remove("userId").unwrap();
        assert!(store.get("userId").unwrap().is_none());
    }

    #[test]
    fn remove_missing_key_succeeds() {
        let store = MemoryBackend::new();
        store.remove("nonexistent").unwrap();
    }

    #[test]
    fn concurrent_writes() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryBackend::new());

        let mut handles = vec![];
        for i in 0..10 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                for j in 0..10 {
                    store_clone
                        .set(&format!("key-{i}-{j}"), &format!("value-{j}"))
                        .unwrap();
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(store.values.read().unwrap().len(), 100);
        assert_eq!(store.get("key-3-7").unwrap().as_deref(), Some("value-7"));
    }
}
