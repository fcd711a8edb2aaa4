//! Audit logging system for Bilancio
//!
//! Records every change made to a ledger through the command line (adds,
//! removes, edits, whole-ledger replacements) in an append-only JSONL file.
//!
//! # Example
//!
//! ```rust,ignore
//! use bilancio_cli::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::add("ledger.csv", &movement))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
