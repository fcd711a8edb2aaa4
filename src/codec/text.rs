//! Tab-separated ledger format
//!
//! Same four fields as the CSV format, separated by tabs, with no header and
//! no escaping. Descriptions are assumed never to contain a tab or a newline.

use crate::error::BilancioResult;
use crate::models::{format_date, Movement};

use super::fields::{decode_lines, read_lines};
use super::{DecodeMode, Decoded};

const DELIMITER: u8 = b'\t';

/// Encode movements as tab-separated text, one line per movement
pub fn encode_text(movements: &[Movement]) -> String {
    let mut output = String::new();

    for movement in movements {
        output.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            format_date(movement.date()),
            movement.description(),
            movement.amount(),
            movement.kind()
        ));
    }

    output
}

/// Decode tab-separated text, failing on the first malformed line
pub fn decode_text(text: &str) -> BilancioResult<Vec<Movement>> {
    decode_text_with(text, DecodeMode::Strict).map(|decoded| decoded.movements)
}

/// Decode tab-separated text with an explicit [`DecodeMode`]
pub fn decode_text_with(text: &str, mode: DecodeMode) -> BilancioResult<Decoded> {
    let lines = read_lines(text, DELIMITER, 1)?;
    decode_lines(lines, str::to_string, mode)
}
