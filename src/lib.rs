//! # Framestock - optical frame inventory
//!
//! A small personal inventory tracker for eyewear frames.
//!
//! Framestock provides:
//! - A validated `Frame` record model
//! - SQLite-backed storage with filtered queries
//! - A query builder for partial-text and price-range search
//! - Two front ends: an interactive CLI and a long-polling chat bot

pub mod frame;
pub mod fields;
pub mod storage;
pub mod query;
pub mod format;
pub mod export;
pub mod prompt;
pub mod config;
pub mod bot;
pub mod ui;

// Re-exports for convenient access
pub use frame::{Frame, FrameBuilder, FrameId, NewFrame};
pub use query::{FrameFilter, SearchCriteria};
pub use storage::FrameStore;

/// Result type alias for Framestock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Framestock operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Chat API error: {0}")]
    Chat(String),
}

impl Error {
    /// Shorthand for building a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// True for malformed or constraint-violating input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // request URLs embed the bot token
        Error::Chat(e.without_url().to_string())
    }
}
