//! Command-line session
//!
//! Holds the working ledger for one invocation: it is loaded at start,
//! mutated by a command, and written back when the command changed it.

use std::path::PathBuf;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{BilancioPaths, Settings};
use crate::error::BilancioResult;
use crate::ledger::LedgerStore;
use crate::storage::LedgerFile;

/// The working ledger and everything needed to persist and audit it
pub struct Session {
    pub settings: Settings,
    pub ledger_file: LedgerFile,
    pub store: LedgerStore,
    audit: Option<AuditLogger>,
}

impl Session {
    /// Open the working ledger; a missing file is an empty ledger
    pub fn open(
        paths: &BilancioPaths,
        settings: Settings,
        override_path: Option<PathBuf>,
    ) -> BilancioResult<Self> {
        let ledger_file = settings.ledger(paths, override_path);
        let decoded = ledger_file.load_or_empty(settings.decode_mode)?;

        for skipped in &decoded.skipped {
            warn!(
                line_number = skipped.line_number,
                reason = %skipped.reason,
                "working ledger line skipped"
            );
            eprintln!(
                "Warning: skipped line {} of {}: {}",
                skipped.line_number,
                ledger_file.path().display(),
                skipped.reason
            );
        }

        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            store: LedgerStore::from_movements(decoded.movements),
            ledger_file,
            settings,
            audit,
        })
    }

    /// Write the working ledger back to its file
    pub fn save(&self) -> BilancioResult<()> {
        let movements = self.store.all();
        self.ledger_file.save(&movements)
    }

    /// Record an entry in the audit log, if enabled
    pub fn audit(&self, entry: AuditEntry) -> BilancioResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }

    /// Path of the working ledger as shown in messages and audit entries
    pub fn ledger_name(&self) -> String {
        self.ledger_file.path().display().to_string()
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}
