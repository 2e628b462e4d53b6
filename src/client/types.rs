//! Wire types for the assistant endpoint and response normalization.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Intent used when the server does not classify the query.
pub const DEFAULT_INTENT: &str = "general_query";

/// Reply text used when the server sends none.
pub const FALLBACK_RESPONSE: &str = "Sorry, I couldn't process your request.";

/// Request body for the ask endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    /// Caller's user identifier.
    pub user_id: &'a str,
    /// The question.
    pub query: &'a str,
}

/// Response body as sent by the server. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub sources: Option<Vec<SourceEntry>>,
    /// Older servers send retrieved documents here instead of `sources`.
    #[serde(default)]
    pub source_docs: Option<Vec<SourceEntry>>,
    #[serde(default)]
    pub action_invoked: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// One citation: plain text or a retrieved document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Text(String),
    /// `{text, metadata, similarity_score}`; only the text is kept.
    Document { text: String },
    Other(Value),
}

impl SourceEntry {
    fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) | Self::Document { text, .. } => Some(text),
            Self::Other(value) => {
                tracing::debug!(%value, "dropping unrecognized source entry");
                None
            }
        }
    }
}

/// Fully populated response handed to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// Reply text.
    pub response: String,
    /// Classified intent.
    pub intent: String,
    /// Classification confidence in `[0, 1]`.
    pub confidence: f64,
    /// Source citations.
    pub sources: Vec<String>,
    /// Name of a server-side action the assistant ran, if any.
    pub action_invoked: Option<String>,
    /// Server timestamp, or receipt time.
    pub timestamp: DateTime<Utc>,
}

impl RawResponse {
    /// Fill defaults for every missing field. `now` stands in for a missing
    /// or unparseable timestamp.
    #[must_use]
    pub fn normalize(self, now: DateTime<Utc>) -> QueryResponse {
        let sources = self
            .sources
            .or(self.source_docs)
            .unwrap_or_default()
            .into_iter()
            .filter_map(SourceEntry::into_text)
            .collect();

        QueryResponse {
            response: non_empty(self.response).unwrap_or_else(|| FALLBACK_RESPONSE.to_string()),
            intent: non_empty(self.intent).unwrap_or_else(|| DEFAULT_INTENT.to_string()),
            confidence: self.confidence.map_or(0.0, |c| c.clamp(0.0, 1.0)),
            sources,
            action_invoked: non_empty(self.action_invoked),
            timestamp: self
                .timestamp
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(now),
        }
    }
}

/// An empty string counts as missing. Any other text is kept as sent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse RFC 3339, or a naive ISO-8601 datetime taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Some(naive.and_utc()),
        Err(e) => {
            tracing::debug!(raw, error = %e, "unparseable response timestamp");
            None
        }
    }
}

/// Pull a human-readable `detail` out of an error body.
#[must_use]
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
