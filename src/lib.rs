//! deskchat - terminal client for a support assistant.
//!
//! Keeps chat histories and preferences in a local key/value store, sends
//! queries to the assistant endpoint, and exports transcripts.

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod logging;
pub mod prefs;
pub mod storage;

pub use config::Config;
pub use error::{Error, RequestError, Result};
