//! `deskchat ask` command implementation.

use crate::cli::Context;
use crate::cli::render::format_message;
use crate::client::HttpClient;
use crate::core::{Exchange, SessionStore};
use crate::error::{Error, Result};

/// Run the ask command.
///
/// Sends one query, continuing chat `chat_id` when given, otherwise starting
/// a new chat.
///
/// # Errors
///
/// Returns an error if the chat is unknown, the query fails, or the
/// exchange cannot be saved.
pub fn run(ctx: &Context, query: &str, chat_id: Option<&str>) -> Result<()> {
    let prefs = ctx.preferences()?;
    let client = HttpClient::new(&prefs.api_url)?;
    let mut session = SessionStore::open(&ctx.store);
    resume(&mut session, chat_id)?;

    let reply = Exchange::new().send(&mut session, &client, &prefs.user_id, query)?;

    println!("{}", format_message(&reply.message));
    if let Some(action) = &reply.action_invoked {
        println!("    action: {action}");
    }
    if let Some(id) = session.current_chat_id() {
        println!("\nchat: {id}");
    }
    Ok(())
}

/// Load `chat_id` into the session, or leave it as a new chat.
///
/// # Errors
///
/// Returns [`Error::ChatNotFound`] for an unknown id.
pub fn resume(session: &mut SessionStore<'_>, chat_id: Option<&str>) -> Result<()> {
    match chat_id {
        Some(id) if !session.load_chat(id) => Err(Error::ChatNotFound(id.to_string())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Message;
    use crate::storage::MemoryBackend;
    use chrono::Utc;

    #[test]
    fn resume_without_id_is_new_chat() {
        let store = MemoryBackend::new();
        let mut session = SessionStore::open(&store);
        resume(&mut session, None).unwrap();
        assert!(session.current_chat_id().is_none());
    }

    #[test]
    fn resume_loads_known_chat() {
        let store = MemoryBackend::new();
        let mut session = SessionStore::open(&store);
        session
            .update_chat_history(
                Message::user("hello"),
                Message::assistant("hi", "greeting", 1.0, Vec::new(), Utc::now()),
            )
            .unwrap();
        let id = session.current_chat_id().unwrap().to_string();

        let mut reopened = SessionStore::open(&store);
        resume(&mut reopened, Some(&id)).unwrap();
        assert_eq!(reopened.current_chat_id(), Some(id.as_str()));
        assert_eq!(reopened.messages().len(), 2);
    }

    #[test]
    fn resume_unknown_chat_errors() {
        let store = MemoryBackend::new();
        let mut session = SessionStore::open(&store);
        let err = resume(&mut session, Some("missing")).unwrap_err();
        assert!(matches!(err, Error::ChatNotFound(id) if id == "missing"));
    }
}
