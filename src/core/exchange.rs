//! Send-message orchestration.
//!
//! One exchange at a time: the user message is buffered optimistically,
//! the query goes out, and the pair is committed on success or the user
//! message is rolled back on failure.

use crate::client::QueryApi;
use crate::core::message::Message;
use crate::core::session::SessionStore;
use crate::error::{Error, Result};

/// Where the exchange state machine currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExchangePhase {
    /// Ready to send.
    #[default]
    Idle,
    /// Waiting for the assistant's reply.
    Sending,
    /// Undoing the optimistic update after a failure.
    Recovering,
}

/// Result of a successful exchange.
#[derive(Debug, Clone)]
pub struct Reply {
    /// The committed assistant message.
    pub message: Message,
    /// Server-side action the assistant ran, if any.
    pub action_invoked: Option<String>,
}

/// Drives exchanges and enforces the single in-flight rule.
#[derive(Debug, Default)]
pub struct Exchange {
    phase: ExchangePhase,
}

impl Exchange {
    /// Create an idle exchange driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ExchangePhase {
        self.phase
    }

    /// Whether an exchange is in progress.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase != ExchangePhase::Idle
    }

    /// Undo the optimistic user message and return to idle.
    fn recover(&mut self, session: &mut SessionStore<'_>, user: &Message) {
        self.phase = ExchangePhase::Recovering;
        session.remove_message(&user.id);
        self.phase = ExchangePhase::Idle;
    }

    /// Send `query` and commit the exchange into `session`.
    ///
    /// On a request or commit failure the optimistically added user message
    /// is removed, leaving the session exactly as it was, and the error is
    /// returned for the caller to surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExchangeInFlight`] when busy, [`Error::EmptyQuery`]
    /// for a blank query, [`Error::Request`] when the query fails, or a
    /// storage error if the commit cannot be persisted.
    pub fn send(
        &mut self,
        session: &mut SessionStore<'_>,
        api: &dyn QueryApi,
        user_id: &str,
        query: &str,
    ) -> Result<Reply> {
        if self.is_busy() {
            return Err(Error::ExchangeInFlight);
        }
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        self.phase = ExchangePhase::Sending;
        let user = Message::user(query);
        session.add_message(user.clone());

        let response = match api.ask(user_id, query) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "query failed, rolling back");
                self.recover(session, &user);
                return Err(e.into());
            }
        };

        let assistant = Message::assistant(
            &response.response,
            &response.intent,
            response.confidence,
            response.sources,
            response.timestamp,
        );
        if let Err(e) = session.update_chat_history(user.clone(), assistant.clone()) {
            tracing::warn!(error = %e, "could not save exchange, rolling back");
            self.recover(session, &user);
            return Err(e);
        }
        self.phase = ExchangePhase::Idle;

        Ok(Reply {
            message: assistant,
            action_invoked: response.action_invoked,
        })
    }
}
