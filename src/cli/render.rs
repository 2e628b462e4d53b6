//! Terminal formatting for messages and chat listings.

use crate::core::{Message, Role};
use chrono::{DateTime, Local, Utc};

/// Maximum length for a title in listings.
const TITLE_PREVIEW_LEN: usize = 50;

/// Format a message for the terminal, metadata included for replies.
#[must_use]
pub fn format_message(message: &Message) -> String {
    let label = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    let mut out = format!(
        "[{}] {label}: {}",
        format_local_time(message.timestamp),
        message.content
    );

    if let Some(meta) = format_metadata(message) {
        out.push('\n');
        out.push_str(&meta);
    }
    out
}

/// `intent | confidence | sources` line, when the message carries any.
#[must_use]
pub fn format_metadata(message: &Message) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(intent) = &message.intent {
        parts.push(format!("intent: {intent}"));
    }
    if let Some(confidence) = message.confidence {
        parts.push(format!("confidence: {:.0}%", confidence * 100.0));
    }
    if let Some(sources) = message.sources.as_ref().filter(|s| !s.is_empty()) {
        parts.push(format!("sources: {}", sources.join(", ")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(format!("    ({})", parts.join(" | ")))
    }
}

/// Format UTC time as local time for display.
#[must_use]
pub fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Single-line title preview, truncated on a character boundary.
#[must_use]
pub fn format_title_preview(title: &str) -> String {
    let first_line = title.lines().next().unwrap_or(title);
    if first_line.chars().count() > TITLE_PREVIEW_LEN {
        let cut: String = first_line.chars().take(TITLE_PREVIEW_LEN).collect();
        format!("{cut}...")
    } else if first_line.is_empty() {
        "(untitled)".to_string()
    } else {
        first_line.to_string()
    }
}
