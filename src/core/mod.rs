//! Core chat state: messages, the session store and exchange orchestration.

pub mod exchange;
pub mod message;
pub mod session;

pub use exchange::{Exchange, ExchangePhase, Reply};
pub use message::{ChatHistory, Message, Role};
pub use session::SessionStore;
