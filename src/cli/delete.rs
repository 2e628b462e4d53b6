//! `deskchat delete` command implementation.

use crate::cli::Context;
use crate::core::SessionStore;
use crate::error::Result;

/// Run the delete command.
///
/// # Errors
///
/// Returns an error if the remaining chats cannot be saved.
pub fn run(ctx: &Context, chat_id: &str) -> Result<()> {
    let mut session = SessionStore::open(&ctx.store);

    if delete_chat(&mut session, chat_id)? {
        println!("Deleted chat {chat_id}.");
    } else {
        println!("No chat with id {chat_id}.");
    }
    Ok(())
}

/// Delete a chat, reporting whether it existed.
fn delete_chat(session: &mut SessionStore<'_>, chat_id: &str) -> Result<bool> {
    let existed = session.find_chat(chat_id).is_some();
    session.delete_chat(chat_id)?;
    Ok(existed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use crate::storage::MemoryBackend;
    use chrono::Utc;

    #[test]
    fn delete_existing_chat_persists() {
        let store = MemoryBackend::new();
        let mut session = SessionStore::open(&store);
        session
            .update_chat_history(
                Message::user("bye"),
                Message::assistant("ok", "general_query", 0.0, Vec::new(), Utc::now()),
            )
            .unwrap();
        let id = session.current_chat_id().unwrap().to_string();

        let mut reopened = SessionStore::open(&store);
        assert!(delete_chat(&mut reopened, &id).unwrap());
        assert!(SessionStore::open(&store).histories().is_empty());
    }

    #[test]
    fn delete_missing_chat_reports_false() {
        let store = MemoryBackend::new();
        let mut session = SessionStore::open(&store);
        assert!(!delete_chat(&mut session, "missing").unwrap());
    }
}
