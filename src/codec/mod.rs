//! Ledger file formats
//!
//! Two plain-text codecs convert between movements and text:
//! - CSV: comma-separated with a header row
//! - Text: tab-separated without a header
//!
//! Codecs work on in-memory text only. Reading and writing files is left to
//! the caller (see `storage`).

pub mod csv;
mod fields;
pub mod text;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BilancioError, BilancioResult};
use crate::models::Movement;

pub use self::csv::{decode_csv, decode_csv_with, encode_csv, CSV_HEADER};
pub use self::text::{decode_text, decode_text_with, encode_text};

/// How decoding treats a line with a malformed date, amount or movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// The first bad line fails the whole decode and nothing is returned
    #[default]
    Strict,
    /// Bad lines are skipped and reported alongside the decoded movements
    SkipMalformed,
}

/// A line left out by [`DecodeMode::SkipMalformed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the decoded document
    pub line_number: usize,
    /// Why the line was rejected
    pub reason: String,
}

/// Result of a decode
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    /// Movements in document order
    pub movements: Vec<Movement>,
    /// Lines skipped in [`DecodeMode::SkipMalformed`]; always empty in strict mode
    pub skipped: Vec<SkippedLine>,
}

/// Ledger file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Comma-separated with header
    #[default]
    Csv,
    /// Tab-separated without header
    Text,
}

impl Format {
    /// Pick a format from a file name: `.csv` (any case) is CSV, anything else is text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Text,
        }
    }

    /// Conventional file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }

    /// Character that separates fields on a line
    pub fn delimiter(&self) -> char {
        match self {
            Self::Csv => ',',
            Self::Text => '\t',
        }
    }

    /// Check that a description survives being written in this format and read back
    ///
    /// Neither format quotes its fields, so the delimiter and line breaks are refused.
    pub fn check_description(&self, description: &str) -> BilancioResult<()> {
        if description.contains(self.delimiter()) {
            return Err(BilancioError::InvalidArgument(format!(
                "description '{}' must not contain {} in a {} ledger",
                description,
                match self {
                    Self::Csv => "a comma",
                    Self::Text => "a tab",
                },
                self
            )));
        }
        if description.contains(['\n', '\r']) {
            return Err(BilancioError::InvalidArgument(
                "description must fit on one line".into(),
            ));
        }
        Ok(())
    }

    pub fn encode(&self, movements: &[Movement]) -> String {
        match self {
            Self::Csv => encode_csv(movements),
            Self::Text => encode_text(movements),
        }
    }

    pub fn decode(&self, text: &str) -> BilancioResult<Vec<Movement>> {
        self.decode_with(text, DecodeMode::Strict)
            .map(|decoded| decoded.movements)
    }

    pub fn decode_with(&self, text: &str, mode: DecodeMode) -> BilancioResult<Decoded> {
        match self {
            Self::Csv => decode_csv_with(text, mode),
            Self::Text => decode_text_with(text, mode),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "CSV"),
            Self::Text => write!(f, "text"),
        }
    }
}
