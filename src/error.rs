//! Custom error types for Bilancio
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Bilancio operations
#[derive(Error, Debug)]
pub enum BilancioError {
    /// Bad inputs when building a movement, or a missing movement on insert
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed date or amount while decoding a ledger document
    #[error("Parse error: {0}")]
    Parse(String),

    /// A total that cannot be represented exactly
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// File I/O errors (raised by the file transport, never by the codecs)
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl BilancioError {
    /// Create a "not found" error for movements
    pub fn movement_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Movement",
            identifier: identifier.into(),
        }
    }

    /// Prefix a decode failure with the line of the document it came from
    pub fn at_line(self, line_number: usize) -> Self {
        match self {
            Self::Parse(msg) => Self::Parse(format!("line {}: {}", line_number, msg)),
            Self::InvalidArgument(msg) => {
                Self::InvalidArgument(format!("line {}: {}", line_number, msg))
            }
            other => other,
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Check if this is an inexact or overflowing total
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Self::Arithmetic(_))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<std::io::Error> for BilancioError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BilancioError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Bilancio operations
pub type BilancioResult<T> = Result<T, BilancioError>;
