//! Error types for Wayfarer

use thiserror::Error;

/// Result type alias for Wayfarer operations
pub type Result<T> = std::result::Result<T, WayfarerError>;

/// Main error type for Wayfarer
#[derive(Error, Debug)]
pub enum WayfarerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Search index error: {0}")]
    Search(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WayfarerError {
    /// Get error code for relay error events
    pub fn code(&self) -> i64 {
        match self {
            WayfarerError::UnknownTool(_) => -32601,
            WayfarerError::InvalidInput(_) => -32602,
            _ => -32000,
        }
    }
}
