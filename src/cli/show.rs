//! `deskchat show` command implementation.

use crate::cli::Context;
use crate::cli::render::format_message;
use crate::core::SessionStore;
use crate::error::{Error, Result};

/// Run the show command.
///
/// Prints every message of a chat, or the raw stored JSON with `json`.
///
/// # Errors
///
/// Returns an error if the chat is not found or cannot be serialized.
pub fn run(ctx: &Context, chat_id: &str, json: bool) -> Result<()> {
    let session = SessionStore::open(&ctx.store);
    let chat = session
        .find_chat(chat_id)
        .ok_or_else(|| Error::ChatNotFound(chat_id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(chat)?);
        return Ok(());
    }

    println!("{}", chat.title);
    println!("{}", "─".repeat(60));
    for message in &chat.messages {
        println!("{}", format_message(message));
    }
    Ok(())
}
