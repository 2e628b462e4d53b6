//! Blocking HTTP client for the assistant endpoint.

use crate::client::QueryApi;
use crate::client::types::{QueryRequest, QueryResponse, RawResponse, extract_detail};
use crate::error::RequestError;
use chrono::Utc;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;

/// HTTP implementation of [`QueryApi`].
///
/// One request per call. No retries, and no client-side timeout: a call
/// waits until the network stack settles it.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    url: Url,
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    #[serde(default)]
    status: Option<String>,
}

impl HttpClient {
    /// Create a client for the ask endpoint at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` does not parse or the client cannot be built.
    pub fn new(url: &str) -> Result<Self, RequestError> {
        let url = Url::parse(url).map_err(|e| RequestError::InvalidUrl(format!("{url}: {e}")))?;
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| RequestError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, url })
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Query the server's health endpoint, the `health` sibling of the ask URL.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    pub fn health(&self) -> Result<String, RequestError> {
        let health_url = self
            .url
            .join("health")
            .map_err(|e| RequestError::InvalidUrl(e.to_string()))?;
        tracing::debug!(url = %health_url, "checking health");

        let response = self
            .client
            .get(health_url)
            .send()
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RequestError::from_status(
                status.as_u16(),
                extract_detail(&body),
            ));
        }

        let parsed: HealthBody =
            serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))?;
        Ok(parsed.status.unwrap_or_else(|| "unknown".to_string()))
    }
}

impl QueryApi for HttpClient {
    fn ask(&self, user_id: &str, query: &str) -> Result<QueryResponse, RequestError> {
        tracing::debug!(url = %self.url, user_id, "sending query");

        let response = self
            .client
            .post(self.url.clone())
            .json(&QueryRequest { user_id, query })
            .send()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "query rejected by server");
            return Err(RequestError::from_status(
                status.as_u16(),
                extract_detail(&body),
            ));
        }

        let raw: RawResponse =
            serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))?;
        Ok(raw.normalize(Utc::now()))
    }
}
