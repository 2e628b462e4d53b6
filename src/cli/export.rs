//! `deskchat export` command implementation.

use crate::cli::Context;
use crate::core::{Message, SessionStore};
use crate::error::{Error, Result};
use crate::export::{render_transcript, transcript_file_name};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the export command.
///
/// Exports chat `chat_id`, or the most recently updated chat, as a
/// plain-text transcript into `out_dir` (current directory by default).
/// With `to_stdout` the transcript is printed instead.
///
/// # Errors
///
/// Returns an error if there is nothing to export, the chat is unknown, or
/// the file cannot be written.
pub fn run(
    ctx: &Context,
    chat_id: Option<&str>,
    out_dir: Option<&Path>,
    to_stdout: bool,
) -> Result<()> {
    let session = SessionStore::open(&ctx.store);

    let chat = match chat_id {
        Some(id) => session
            .find_chat(id)
            .ok_or_else(|| Error::ChatNotFound(id.to_string()))?,
        None => session
            .histories()
            .iter()
            .max_by_key(|c| c.last_updated)
            .ok_or_else(|| Error::ChatNotFound("(no chats saved)".to_string()))?,
    };

    if to_stdout {
        println!("{}", render_transcript(&chat.messages));
        return Ok(());
    }

    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    let path = write_transcript(dir, &chat.messages)?;
    println!("Exported \"{}\" to {}", chat.title, path.display());
    Ok(())
}

/// Write a transcript named after today's date into `dir`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_transcript(dir: &Path, messages: &[Message]) -> Result<PathBuf> {
    let path = dir.join(transcript_file_name(Local::now().date_naive()));
    fs::write(&path, render_transcript(messages))?;
    tracing::info!(path = %path.display(), count = messages.len(), "wrote transcript");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DIVIDER;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn write_transcript_creates_dated_file() {
        let temp = TempDir::new().unwrap();
        let messages = vec![
            Message::user("Can I change my plan?"),
            Message::assistant("Yes, from settings.", "billing", 0.6, Vec::new(), Utc::now()),
        ];

        let path = write_transcript(temp.path(), &messages).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("chat-export-"));
        assert!(name.ends_with(".txt"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("USER: Can I change my plan?"));
        assert!(contents.contains("ASSISTANT: Yes, from settings."));
        assert!(contents.contains(DIVIDER));
    }

    #[test]
    fn write_transcript_into_missing_dir_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(write_transcript(&missing, &[Message::user("x")]).is_err());
    }
}
