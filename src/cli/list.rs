//! `deskchat list` command implementation.

use crate::cli::Context;
use crate::cli::render::{format_local_time, format_title_preview};
use crate::core::{ChatHistory, SessionStore};
use crate::error::Result;

/// Default number of chats to show.
const DEFAULT_LIMIT: usize = 20;

/// Run the list command.
///
/// Shows saved chats, most recent first, with id, last update and title.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let session = SessionStore::open(&ctx.store);
    let chats = recent_chats(session.histories(), limit.unwrap_or(DEFAULT_LIMIT));

    if chats.is_empty() {
        println!("No chats found.");
        println!("\nChats are stored in: {}", ctx.config.storage.path.display());
        return Ok(());
    }

    println!("{:<38} {:<18} {:>5}  Title", "Chat ID", "Updated", "Msgs");
    println!("{}", "─".repeat(100));

    for chat in &chats {
        println!(
            "{:<38} {:<18} {:>5}  {}",
            chat.id,
            format_local_time(chat.last_updated),
            chat.messages.len(),
            format_title_preview(&chat.title)
        );
    }

    println!("{}", "─".repeat(100));
    println!(
        "Showing {} of {} chat(s)",
        chats.len(),
        session.histories().len()
    );

    Ok(())
}

/// Up to `limit` chats, most recent first.
fn recent_chats(histories: &[ChatHistory], limit: usize) -> Vec<&ChatHistory> {
    let mut chats: Vec<&ChatHistory> = histories.iter().collect();
    chats.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    chats.truncate(limit);
    chats
}
