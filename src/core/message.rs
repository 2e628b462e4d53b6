//! Chat message and history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person using the client.
    User,
    /// The support assistant.
    Assistant,
}

impl Role {
    /// Lowercase label used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message identifier.
    pub id: String,

    /// Author of the message.
    pub role: Role,

    /// Message text.
    pub content: String,

    /// Intent the assistant classified the query as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,

    /// Confidence of the intent classification, in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Source citations backing the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,

    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a user message stamped with the current time.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self {
            id: new_id(),
            role: Role::User,
            content: content.to_string(),
            intent: None,
            confidence: None,
            sources: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant message with response metadata.
    #[must_use]
    pub fn assistant(
        content: &str,
        intent: &str,
        confidence: f64,
        sources: Vec<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: content.to_string(),
            intent: Some(intent.to_string()),
            confidence: Some(confidence),
            sources: Some(sources),
            timestamp,
        }
    }
}

/// One persisted conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatHistory {
    /// Unique chat identifier.
    pub id: String,

    /// Title derived from the first user message.
    pub title: String,

    /// Messages in conversation order.
    pub messages: Vec<Message>,

    /// When the chat last received an exchange.
    #[serde(rename = "lastUpdated")]
    pub last_updated: DateTime<Utc>,
}

impl ChatHistory {
    /// Create a chat titled after `first_user_content`.
    #[must_use]
    pub fn new(first_user_content: &str, messages: Vec<Message>) -> Self {
        Self {
            id: new_id(),
            title: make_title(first_user_content),
            messages,
            last_updated: Utc::now(),
        }
    }
}

/// First [`TITLE_MAX_CHARS`] characters of `content`.
#[must_use]
pub fn make_title(content: &str) -> String {
    content.chars().take(TITLE_MAX_CHARS).collect()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_has_no_metadata() {
        let msg = Message::user("Where is my order?");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Where is my order?");
        assert!(msg.intent.is_none());
        assert!(msg.confidence.is_none());
        assert!(msg.sources.is_none());
    }

    #[test]
    fn message_ids_are_distinct_under_rapid_creation() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| Message::user("x").id).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn title_truncates_to_fifty_chars() {
        let long = "a".repeat(80);
        assert_eq!(make_title(&long).chars().count(), 50);
        assert_eq!(make_title("Hello"), "Hello");
    }

    #[test]
    fn title_truncates_on_char_boundaries() {
        let long = "é".repeat(60);
        let title = make_title(&long);
        assert_eq!(title.chars().count(), 50);
        assert_eq!(title.len(), 100);
    }

    #[test]
    fn user_message_serialization_skips_absent_fields() {
        let msg = Message::user("hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("intent"));
        assert!(!json.contains("sources"));
    }

    #[test]
    fn chat_history_uses_camel_case_last_updated() {
        let chat = ChatHistory::new("Hello", vec![Message::user("Hello")]);
        let json = serde_json::to_string(&chat).unwrap();
        assert!(json.contains("lastUpdated"));
        assert!(!json.contains("last_updated"));
    }

    #[test]
    fn chat_history_deserializes_from_stored_shape() {
        let json = r#"{
            "id": "1700000000000",
            "title": "Reset password",
            "lastUpdated": "2024-05-01T10:15:30.123Z",
            "messages": [
                {"id": "1", "role": "user", "content": "Reset password",
                 "timestamp": "2024-05-01T10:15:29.000Z"},
                {"id": "2", "role": "assistant", "content": "Sure.",
                 "intent": "password_reset", "confidence": 0.92,
                 "sources": ["faq.md"], "timestamp": "2024-05-01T10:15:30.123Z"}
            ]
        }"#;
        let chat: ChatHistory = serde_json::from_str(json).unwrap();
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[1].role, Role::Assistant);
        assert_eq!(chat.messages[1].confidence, Some(0.92));
        assert_eq!(chat.last_updated, chat.messages[1].timestamp);
    }
}
