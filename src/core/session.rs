//! Session store: persisted chat histories plus the live message buffer.
//!
//! Histories are read once when the store is opened and rewritten in full
//! on every mutation. The live buffer is never persisted on its own; it
//! reaches storage only through [`SessionStore::update_chat_history`].

use crate::core::message::{ChatHistory, Message};
use crate::error::Result;
use crate::storage::{KEY_CHAT_HISTORIES, KeyValueStore};
use chrono::Utc;

/// Owner of chat histories, the active chat and the message buffer.
pub struct SessionStore<'a> {
    store: &'a dyn KeyValueStore,
    histories: Vec<ChatHistory>,
    current_chat_id: Option<String>,
    messages: Vec<Message>,
}

impl std::fmt::Debug for SessionStore<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("histories", &self.histories.len())
            .field("current_chat_id", &self.current_chat_id)
            .field("messages", &self.messages.len())
            .finish_non_exhaustive()
    }
}

impl<'a> SessionStore<'a> {
    /// Open the session store, restoring persisted histories.
    ///
    /// A missing, unreadable or corrupt collection restores as empty.
    #[must_use]
    pub fn open(store: &'a dyn KeyValueStore) -> Self {
        Self {
            store,
            histories: restore_histories(store),
            current_chat_id: None,
            messages: Vec::new(),
        }
    }

    /// All histories, most recent first.
    #[must_use]
    pub fn histories(&self) -> &[ChatHistory] {
        &self.histories
    }

    /// The live message buffer.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Id of the active chat, if any.
    #[must_use]
    pub fn current_chat_id(&self) -> Option<&str> {
        self.current_chat_id.as_deref()
    }

    /// The active chat, if any.
    #[must_use]
    pub fn current_chat(&self) -> Option<&ChatHistory> {
        self.current_chat_id.as_deref().and_then(|id| self.find_chat(id))
    }

    /// Look up a chat by id.
    #[must_use]
    pub fn find_chat(&self, id: &str) -> Option<&ChatHistory> {
        self.histories.iter().find(|c| c.id == id)
    }

    /// Clear the buffer and the active chat. Persisted histories are untouched.
    pub fn start_new_chat(&mut self) {
        self.messages.clear();
        self.current_chat_id = None;
    }

    /// Make chat `id` active and copy its messages into the buffer.
    ///
    /// Unknown ids leave the state unchanged. Returns whether a chat was loaded.
    pub fn load_chat(&mut self, id: &str) -> bool {
        let Some(chat) = self.histories.iter().find(|c| c.id == id) else {
            tracing::debug!(chat_id = id, "load_chat: no such chat");
            return false;
        };
        self.messages = chat.messages.clone();
        self.current_chat_id = Some(chat.id.clone());
        true
    }

    /// Delete chat `id`. Deleting the active chat also starts a new chat.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the remaining histories fails, in which
    /// case nothing changes.
    pub fn delete_chat(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.histories.iter().position(|c| c.id == id) else {
            tracing::debug!(chat_id = id, "delete_chat: no such chat");
            return Ok(());
        };

        let mut remaining = self.histories.clone();
        remaining.remove(index);
        self.persist(&remaining)?;
        self.histories = remaining;

        if self.current_chat_id.as_deref() == Some(id) {
            self.start_new_chat();
        }
        Ok(())
    }

    /// Remove every history and return to the new-chat state.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored collection cannot be removed, in which
    /// case nothing changes.
    pub fn clear_history(&mut self) -> Result<()> {
        self.store.remove(KEY_CHAT_HISTORIES)?;
        self.histories.clear();
        self.start_new_chat();
        Ok(())
    }

    /// Append a message to the buffer without persisting it.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove a buffered message by id. Returns whether one was removed.
    pub fn remove_message(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    /// Commit one completed exchange.
    ///
    /// The user message is appended only if [`Self::add_message`] has not
    /// already buffered it. With an active chat, its messages are replaced by
    /// the buffer; otherwise a new chat is created at the front and made active.
    ///
    /// # Errors
    ///
    /// Returns an error if the histories cannot be persisted. The session is
    /// then left exactly as it was before the call.
    pub fn update_chat_history(&mut self, user: Message, assistant: Message) -> Result<()> {
        let mut messages = self.messages.clone();
        if !messages.iter().any(|m| m.id == user.id) {
            messages.push(user.clone());
        }
        if !messages.iter().any(|m| m.id == assistant.id) {
            messages.push(assistant);
        }

        let mut histories = self.histories.clone();
        let active = self
            .current_chat_id
            .as_deref()
            .and_then(|id| histories.iter().position(|c| c.id == id));

        let current_chat_id = if let Some(index) = active {
            let chat = &mut histories[index];
            chat.messages.clone_from(&messages);
            chat.last_updated = Utc::now();
            chat.id.clone()
        } else {
            let chat = ChatHistory::new(&user.content, messages.clone());
            let id = chat.id.clone();
            histories.insert(0, chat);
            id
        };

        self.persist(&histories)?;
        if active.is_none() {
            tracing::info!(chat_id = %current_chat_id, title = %histories[0].title, "created chat");
        }

        self.histories = histories;
        self.messages = messages;
        self.current_chat_id = Some(current_chat_id);
        Ok(())
    }

    /// Rewrite the full histories collection.
    fn persist(&self, histories: &[ChatHistory]) -> Result<()> {
        let encoded = serde_json::to_string(histories)?;
        self.store.set(KEY_CHAT_HISTORIES, &encoded)?;
        tracing::debug!(count = histories.len(), "persisted chat histories");
        Ok(())
    }
}

/// Read the stored collection, treating any failure as empty.
fn restore_histories(store: &dyn KeyValueStore) -> Vec<ChatHistory> {
    let raw = match store.get(KEY_CHAT_HISTORIES) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "could not read chat histories, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(histories) => histories,
        Err(e) => {
            tracing::warn!(error = %e, "chat histories are corrupt, starting empty");
            Vec::new()
        }
    }
}
