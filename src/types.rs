//! Core types for Wayfarer

use serde::{Deserialize, Serialize};

/// Three-letter IATA city code, the canonical destination identifier
pub type DestinationCode = String;

/// Destination code validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    Empty,
    WrongLength,
    InvalidChars,
}

impl std::fmt::Display for CodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CodeError::Empty => write!(f, "Destination code cannot be empty"),
            CodeError::WrongLength => write!(f, "Destination code must be exactly 3 letters"),
            CodeError::InvalidChars => {
                write!(f, "Destination code must be 3 uppercase ASCII letters")
            }
        }
    }
}

impl std::error::Error for CodeError {}

/// Validate an IATA-style destination/location code.
///
/// Rules:
/// - Exactly 3 characters
/// - Uppercase ASCII letters only
///
/// Codes are embedded verbatim into search filter expressions, so the
/// charset here doubles as the filter-injection guard.
pub fn validate_destination_code(code: &str) -> Result<(), CodeError> {
    if code.is_empty() {
        return Err(CodeError::Empty);
    }
    if code.len() != 3 {
        return Err(CodeError::WrongLength);
    }
    if !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(CodeError::InvalidChars);
    }
    Ok(())
}

/// Category tag validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    Empty,
    TooLong,
    InvalidChars,
}

/// Maximum category tag length
pub const MAX_CATEGORY_LENGTH: usize = 32;

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryError::Empty => write!(f, "Category tag cannot be empty"),
            CategoryError::TooLong => {
                write!(f, "Category tag exceeds {} characters", MAX_CATEGORY_LENGTH)
            }
            CategoryError::InvalidChars => {
                write!(f, "Category tag can only contain letters and digits")
            }
        }
    }
}

impl std::error::Error for CategoryError {}

/// Validate a destination category tag.
///
/// Rules:
/// - Non-empty, max 32 characters
/// - Unicode letters and digits only (the tag vocabulary is Portuguese,
///   e.g. "Família", "Praia")
///
/// Like destination codes, tags are embedded into filter expressions and
/// must stay within a known-safe charset.
pub fn validate_category_tag(tag: &str) -> Result<(), CategoryError> {
    if tag.is_empty() {
        return Err(CategoryError::Empty);
    }
    if tag.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(CategoryError::TooLong);
    }
    if !tag.chars().all(|c| c.is_alphanumeric()) {
        return Err(CategoryError::InvalidChars);
    }
    Ok(())
}

/// A single hit returned by the search collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// Citation key, surfaced to the model in square brackets
    pub key: String,
    /// Document title
    pub title: String,
    /// Passage text
    pub body: String,
}

/// Flight lookup result for a specific origin/destination/date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightInfo {
    pub source: String,
    pub destination: String,
    /// Price in EUR; 0.0 when no fare covers the trip date
    pub price: f64,
    /// Duration in hours; 0.0 when the route is unknown
    pub duration: f64,
    pub trip_date: String,
}

/// Where a tool result is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolDirection {
    /// Fed back to the model only
    ToServer,
    /// Surfaced to the end user without being re-read by the model
    ToClient,
}

/// The return contract of every tool: a payload tagged with its direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub payload: serde_json::Value,
    pub direction: ToolDirection,
}

impl ToolResult {
    /// Text blob destined for the model
    pub fn server_text(text: impl Into<String>) -> Self {
        Self {
            payload: serde_json::Value::String(text.into()),
            direction: ToolDirection::ToServer,
        }
    }

    /// Structured object destined for the model
    pub fn server_json(payload: serde_json::Value) -> Self {
        Self {
            payload,
            direction: ToolDirection::ToServer,
        }
    }

    /// Structured object surfaced to the client
    pub fn client_json(payload: serde_json::Value) -> Self {
        Self {
            payload,
            direction: ToolDirection::ToClient,
        }
    }
}
