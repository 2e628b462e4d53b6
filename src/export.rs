//! Plain-text transcript export.

use crate::core::Message;
use chrono::{DateTime, Local, NaiveDate};

/// Separator placed between message blocks.
pub const DIVIDER: &str = "\n\n---\n\n";

/// Render messages as a transcript.
///
/// Each block is `ROLE: content` followed by the local timestamp.
#[must_use]
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| {
            let local: DateTime<Local> = m.timestamp.into();
            format!(
                "{}: {}\n{}",
                m.role.as_str().to_uppercase(),
                m.content,
                local.format("%Y-%m-%d %H:%M:%S")
            )
        })
        .collect::<Vec<_>>()
        .join(DIVIDER)
}

/// File name for a transcript exported on `date`.
#[must_use]
pub fn transcript_file_name(date: NaiveDate) -> String {
    format!("chat-export-{}.txt", date.format("%Y-%m-%d"))
}
