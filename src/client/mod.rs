//! Query client for the remote support assistant.

pub mod http;
pub mod types;

pub use http::HttpClient;
pub use types::{DEFAULT_INTENT, FALLBACK_RESPONSE, QueryResponse};

use crate::error::RequestError;

/// One request/response cycle against the assistant.
pub trait QueryApi {
    /// Send `query` on behalf of `user_id` and return the normalized reply.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] on any failure; there is no partial result.
    fn ask(&self, user_id: &str, query: &str) -> Result<QueryResponse, RequestError>;
}
