//! Audit entry data structures
//!
//! Defines the operations that change a ledger and the entry format written
//! for each of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Movement;

/// Types of ledger changes that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A movement was appended
    Add,
    /// A movement was removed
    Remove,
    /// A movement was removed and a new one added in its place
    Edit,
    /// The whole ledger was replaced by the content of a file
    Replace,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Remove => write!(f, "REMOVE"),
            Operation::Edit => write!(f, "EDIT"),
            Operation::Replace => write!(f, "REPLACE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Path of the ledger file that was changed
    pub ledger: String,

    /// Human-readable one-line summary
    pub summary: String,

    /// Movement before the operation (removes and edits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Movement after the operation (adds and edits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

impl AuditEntry {
    fn new(operation: Operation, ledger: impl Into<String>, summary: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            ledger: ledger.into(),
            summary,
            before: None,
            after: None,
        }
    }

    /// Entry for an appended movement
    pub fn add(ledger: impl Into<String>, movement: &Movement) -> Self {
        let mut entry = Self::new(Operation::Add, ledger, movement.to_string());
        entry.after = serde_json::to_value(movement).ok();
        entry
    }

    /// Entry for a removed movement
    pub fn remove(ledger: impl Into<String>, movement: &Movement) -> Self {
        let mut entry = Self::new(Operation::Remove, ledger, movement.to_string());
        entry.before = serde_json::to_value(movement).ok();
        entry
    }

    /// Entry for a movement replaced by another
    pub fn edit(ledger: impl Into<String>, before: &Movement, after: &Movement) -> Self {
        let mut entry = Self::new(
            Operation::Edit,
            ledger,
            format!("{} -> {}", before, after),
        );
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        entry
    }

    /// Entry for a ledger replaced by the content of `source`
    pub fn replace(
        ledger: impl Into<String>,
        source: impl std::fmt::Display,
        previous: usize,
        loaded: usize,
    ) -> Self {
        Self::new(
            Operation::Replace,
            ledger,
            format!(
                "replaced {} movements with {} from {}",
                previous, loaded, source
            ),
        )
    }
}

impl std::fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<7} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.summary
        )
    }
}
