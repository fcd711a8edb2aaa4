//! File transport for ledgers
//!
//! Moves ledger text between the file system and the codecs. The codecs never
//! touch files; this layer never parses fields. I/O failures surface as
//! `BilancioError::Io`, decode failures as `Parse` or `InvalidArgument`.

pub mod file_io;

pub use file_io::{ensure_extension, read_json, read_text, write_json_atomic, write_text_atomic};

use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec::{DecodeMode, Decoded, Format};
use crate::error::BilancioError;
use crate::models::Movement;

/// A ledger file on disk together with its format
#[derive(Debug, Clone)]
pub struct LedgerFile {
    path: PathBuf,
    format: Format,
}

impl LedgerFile {
    /// Ledger file whose format follows its extension
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        Self { path, format }
    }

    /// Ledger file with an explicit format
    pub fn with_format(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and decode the file
    ///
    /// A missing file is an I/O error; use [`LedgerFile::load_or_empty`] for
    /// the working ledger, which may not exist yet.
    pub fn load(&self, mode: DecodeMode) -> Result<Decoded, BilancioError> {
        let text = read_text(&self.path)?;
        let decoded = self.format.decode_with(&text, mode)?;
        info!(
            path = %self.path.display(),
            format = %self.format,
            movements = decoded.movements.len(),
            skipped = decoded.skipped.len(),
            "loaded ledger"
        );
        Ok(decoded)
    }

    /// Like [`LedgerFile::load`], but a missing file decodes as an empty ledger
    pub fn load_or_empty(&self, mode: DecodeMode) -> Result<Decoded, BilancioError> {
        if !self.exists() {
            return Ok(Decoded::default());
        }
        self.load(mode)
    }

    /// Encode and write movements, replacing the file atomically
    pub fn save(&self, movements: &[Movement]) -> Result<(), BilancioError> {
        write_text_atomic(&self.path, &self.format.encode(movements))?;
        info!(
            path = %self.path.display(),
            format = %self.format,
            movements = movements.len(),
            "saved ledger"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn movements() -> Vec<Movement> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        vec![
            Movement::income(day, "Stipendio", dec!(1500.00)).unwrap(),
            Movement::expense(day, "Affitto", dec!(600.00)).unwrap(),
        ]
    }

    #[test]
    fn test_save_and_load_both_formats() {
        let temp_dir = TempDir::new().unwrap();

        for name in ["ledger.csv", "ledger.txt"] {
            let file = LedgerFile::new(temp_dir.path().join(name));
            file.save(&movements()).unwrap();

            let decoded = file.load(DecodeMode::Strict).unwrap();
            assert_eq!(decoded.movements, movements());
        }
    }

    #[test]
    fn test_format_follows_extension() {
        let temp_dir = TempDir::new().unwrap();
        let file = LedgerFile::new(temp_dir.path().join("ledger.csv"));
        file.save(&movements()).unwrap();

        let text = read_text(file.path()).unwrap();
        assert!(text.starts_with("Data,Descrizione,Ammontare,Tipo\n"));
        assert_eq!(LedgerFile::new("ledger.tsv").format(), Format::Text);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = LedgerFile::new(temp_dir.path().join("missing.csv"));

        assert!(file.load(DecodeMode::Strict).unwrap_err().is_io());
        assert!(file
            .load_or_empty(DecodeMode::Strict)
            .unwrap()
            .movements
            .is_empty());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.txt");
        std::fs::write(&path, "1/13/2024\tX\t1\tIncome\n").unwrap();

        let err = LedgerFile::new(path).load(DecodeMode::Strict).unwrap_err();
        assert!(err.is_parse());
    }
}
