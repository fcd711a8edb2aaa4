//! Calendar dates in the `dd/mm/yyyy` form used by both ledger file formats

use chrono::NaiveDate;

use crate::error::{BilancioError, BilancioResult};

/// strftime pattern for movement dates on disk and on the command line
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parse a `dd/mm/yyyy` date
///
/// Surrounding whitespace is not accepted; the ledger formats never emit it.
pub fn parse_date(s: &str) -> BilancioResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| BilancioError::Parse(format!("invalid date '{}': {}", s, e)))
}

/// Format a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
