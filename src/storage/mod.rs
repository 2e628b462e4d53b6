//! Durable key/value storage backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use traits::{KEY_API_URL, KEY_CHAT_HISTORIES, KEY_THEME, KEY_USER_ID, KeyValueStore};
