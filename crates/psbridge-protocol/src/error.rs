//! Error types for protocol operations
//!
//! Provides error types for encoding requests and decoding responses.

use serde_json::error::Category;
use std::fmt;

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while encoding or decoding wire payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A value could not be serialized to JSON
    Encode(String),

    /// The payload was empty or contained only whitespace
    EmptyPayload,

    /// The payload is not well-formed JSON (syntax error or truncated input)
    MalformedPayload(String),

    /// The payload is well-formed JSON but not the expected shape
    /// (missing key, wrong type, not an object)
    InvalidShape(String),
}

impl ProtocolError {
    /// Whether this error came from decoding an inbound payload.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, Self::Encode(_))
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(msg) => write!(f, "Encode error: {}", msg),
            Self::EmptyPayload => write!(f, "Decode error: payload is empty"),
            Self::MalformedPayload(msg) => write!(f, "Decode error: malformed JSON: {}", msg),
            Self::InvalidShape(msg) => write!(f, "Decode error: unexpected shape: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Classifies a deserialization failure.
///
/// Encoding paths map their errors to [`ProtocolError::Encode`] explicitly, so
/// this conversion is only used on the decode side.
impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::InvalidShape(err.to_string()),
            Category::Syntax | Category::Eof | Category::Io => {
                Self::MalformedPayload(err.to_string())
            }
        }
    }
}
