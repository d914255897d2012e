//! Consent Gate - a minimal conversational gate for chat users
//!
//! This library shows a chat user a fixed sequence of screens, collects
//! button-press acknowledgements and appends every interaction to an
//! append-only SQLite log.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bot;
pub mod config;
pub mod dispatcher;
pub mod screens;
pub mod storage;
pub mod telegram;

/// Result type alias for Consent Gate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Consent Gate operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Chat transport error reported by the messaging platform
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Initialize the Consent Gate library with logging
pub fn init() {
    tracing_subscriber::fmt::init();
}

#[cfg(test)]
mod tests;
