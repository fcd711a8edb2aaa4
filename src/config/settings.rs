//! User settings for Bilancio
//!
//! Manages the working ledger location, the decode policy for loaded files,
//! audit logging and display preferences.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::BilancioPaths;
use crate::codec::{DecodeMode, Format};
use crate::error::BilancioError;
use crate::storage::{read_json, write_json_atomic, LedgerFile};

/// User settings for Bilancio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Working ledger file; defaults to `data/ledger.txt` under the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,

    /// Format used for the working ledger when it has no `.csv` extension
    #[serde(default = "default_ledger_format")]
    pub default_format: Format,

    /// How malformed lines are treated when loading files
    #[serde(default)]
    pub decode_mode: DecodeMode,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_ledger_format() -> Format {
    Format::Text
}

fn default_audit_enabled() -> bool {
    true
}

fn default_currency() -> String {
    "€".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            ledger_file: None,
            default_format: default_ledger_format(),
            decode_mode: DecodeMode::default(),
            audit_enabled: default_audit_enabled(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &BilancioPaths) -> Result<Self, BilancioError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            BilancioError::Json(msg) => {
                BilancioError::Config(format!("Failed to parse settings file: {}", msg))
            }
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BilancioPaths) -> Result<(), BilancioError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The working ledger, honouring an explicit override first
    pub fn ledger(&self, paths: &BilancioPaths, override_path: Option<PathBuf>) -> LedgerFile {
        let path = override_path
            .or_else(|| self.ledger_file.clone())
            .unwrap_or_else(|| paths.default_ledger_file());

        if Format::from_path(&path) == Format::Csv {
            LedgerFile::with_format(path, Format::Csv)
        } else {
            LedgerFile::with_format(path, self.default_format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.decode_mode, DecodeMode::Strict);
        assert_eq!(settings.default_format, Format::Text);
        assert!(settings.audit_enabled);
        assert!(settings.ledger_file.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilancioPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilancioPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.decode_mode = DecodeMode::SkipMalformed;
        settings.audit_enabled = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.decode_mode, DecodeMode::SkipMalformed);
        assert!(!loaded.audit_enabled);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilancioPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_format": "csv"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_format, Format::Csv);
        assert!(loaded.audit_enabled);
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilancioPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BilancioError::Config(_)));
    }

    #[test]
    fn test_ledger_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BilancioPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        let ledger = settings.ledger(&paths, None);
        assert_eq!(ledger.path(), paths.default_ledger_file());
        assert_eq!(ledger.format(), Format::Text);

        settings.ledger_file = Some(temp_dir.path().join("movimenti.dat"));
        assert_eq!(settings.ledger(&paths, None).format(), Format::Text);
        settings.default_format = Format::Csv;
        assert_eq!(settings.ledger(&paths, None).format(), Format::Csv);

        let ledger = settings.ledger(&paths, Some(temp_dir.path().join("altro.csv")));
        assert_eq!(ledger.path(), temp_dir.path().join("altro.csv"));
        assert_eq!(ledger.format(), Format::Csv);
    }
}
