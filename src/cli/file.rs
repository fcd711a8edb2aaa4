//! CLI commands for ledger files
//!
//! Saving the working ledger to CSV or text, and replacing it with the
//! content of a CSV or text file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use tracing::info;

use crate::audit::AuditEntry;
use crate::codec::{DecodeMode, Format};
use crate::display::format_balance;
use crate::error::{BilancioError, BilancioResult};
use crate::storage::{ensure_extension, LedgerFile};

use super::session::Session;

/// File subcommands
#[derive(Subcommand)]
pub enum FileCommands {
    /// Save the ledger as CSV (".csv" is appended if missing)
    SaveCsv {
        /// Output file path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Export the ledger as tab-separated text (".txt" is appended if missing)
    ExportTxt {
        /// Output file path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Replace the ledger with the movements of a CSV file
    LoadCsv {
        /// CSV file to read
        path: PathBuf,
        /// Skip lines with a bad date or amount instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Replace the ledger with the movements of a text file
    LoadTxt {
        /// Text file to read
        path: PathBuf,
        /// Skip lines with a bad date or amount instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },
}

/// Handle a file command
pub fn handle_file_command(session: &mut Session, cmd: FileCommands) -> BilancioResult<()> {
    match cmd {
        FileCommands::SaveCsv { path, force } => write_to(session, &path, Format::Csv, force),
        FileCommands::ExportTxt { path, force } => write_to(session, &path, Format::Text, force),
        FileCommands::LoadCsv {
            path,
            skip_malformed,
        } => load_from(session, path, Format::Csv, skip_malformed),
        FileCommands::LoadTxt {
            path,
            skip_malformed,
        } => load_from(session, path, Format::Text, skip_malformed),
    }
}

fn write_to(session: &Session, path: &Path, format: Format, force: bool) -> BilancioResult<()> {
    let path = ensure_extension(path, format.extension());
    if path.exists() && !force {
        return Err(BilancioError::InvalidArgument(format!(
            "{} already exists; use --force to overwrite it",
            path.display()
        )));
    }

    let movements = session.store.all();
    LedgerFile::with_format(&path, format).save(&movements)?;

    println!(
        "Saved {} movements as {} to: {}",
        movements.len(),
        format,
        path.display()
    );
    Ok(())
}

fn load_from(
    session: &mut Session,
    path: PathBuf,
    format: Format,
    skip_malformed: bool,
) -> BilancioResult<()> {
    let mode = if skip_malformed {
        DecodeMode::SkipMalformed
    } else {
        session.settings.decode_mode
    };

    // Decode and check fully before touching the ledger
    let decoded = LedgerFile::with_format(&path, format).load(mode)?;
    let working_format = session.ledger_file.format();
    for movement in &decoded.movements {
        working_format.check_description(movement.description())?;
    }

    let previous = session.store.len();
    let loaded = decoded.movements.len();
    session.store.replace_all(decoded.movements);
    session.save()?;
    session.audit(AuditEntry::replace(
        session.ledger_name(),
        path.display().to_string(),
        previous,
        loaded,
    ))?;
    info!(source = %path.display(), previous, loaded, "ledger replaced");

    for skipped in &decoded.skipped {
        eprintln!(
            "Warning: skipped line {}: {}",
            skipped.line_number, skipped.reason
        );
    }

    println!("Loaded {} movements from: {}", loaded, path.display());
    if !decoded.skipped.is_empty() {
        println!("Skipped {} malformed lines", decoded.skipped.len());
    }
    println!("{}", format_balance(session.store.balance()?));
    Ok(())
}
