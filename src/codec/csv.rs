//! Comma-separated ledger format
//!
//! ```text
//! Data,Descrizione,Ammontare,Tipo
//! 01/01/2024,Stipendio,1500.00,Income
//! ```
//!
//! Descriptions only have their double quotes escaped as `\"`. Commas are
//! written as they are and are not quoted, so a description containing a comma
//! shifts the columns that follow it when the file is read back. Existing files
//! depend on this layout, so it is kept as is.

use crate::error::BilancioResult;
use crate::models::{format_date, Movement};

use super::fields::{decode_lines, read_lines, skip_first_line};
use super::{DecodeMode, Decoded};

/// Header line written at the top of every CSV ledger
pub const CSV_HEADER: &str = "Data,Descrizione,Ammontare,Tipo";

const DELIMITER: u8 = b',';

/// Encode movements as CSV text, header first, one line per movement
pub fn encode_csv(movements: &[Movement]) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');

    for movement in movements {
        output.push_str(&format!(
            "{},{},{},{}\n",
            format_date(movement.date()),
            escape_description(movement.description()),
            movement.amount(),
            movement.kind()
        ));
    }

    output
}

/// Decode CSV text, failing on the first malformed line
///
/// The first line is always discarded as the header, whatever it contains.
pub fn decode_csv(text: &str) -> BilancioResult<Vec<Movement>> {
    decode_csv_with(text, DecodeMode::Strict).map(|decoded| decoded.movements)
}

/// Decode CSV text with an explicit [`DecodeMode`]
pub fn decode_csv_with(text: &str, mode: DecodeMode) -> BilancioResult<Decoded> {
    let body = skip_first_line(text);
    let lines = read_lines(body, DELIMITER, 2)?;
    decode_lines(lines, unescape_description, mode)
}

fn escape_description(s: &str) -> String {
    s.replace('"', "\\\"")
}

fn unescape_description(s: &str) -> String {
    s.replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_encode() {
        let movements = vec![
            Movement::income(day(1), "Stipendio", dec!(1500.00)).unwrap(),
            Movement::expense(day(2), "Cena \"Da Mario\"", dec!(42.5)).unwrap(),
        ];

        let csv = encode_csv(&movements);
        assert_eq!(
            csv,
            "Data,Descrizione,Ammontare,Tipo\n\
             01/01/2024,Stipendio,1500.00,Income\n\
             02/01/2024,Cena \\\"Da Mario\\\",42.5,Expense\n"
        );
    }

    #[test]
    fn test_encode_empty_is_header_only() {
        assert_eq!(encode_csv(&[]), "Data,Descrizione,Ammontare,Tipo\n");
    }

    #[test]
    fn test_round_trip() {
        let movements = vec![
            Movement::income(day(1), "Stipendio", dec!(1500.00)).unwrap(),
            Movement::expense(day(1), "Libro \"Rust\"", dec!(0)).unwrap(),
            Movement::expense(day(3), "Affitto", dec!(600.00)).unwrap(),
        ];

        let decoded = decode_csv(&encode_csv(&movements)).unwrap();
        assert_eq!(decoded, movements);
        assert_eq!(decoded[0].kind(), MovementKind::Income);
        assert_eq!(decoded[1].description(), "Libro \"Rust\"");
        assert_eq!(decoded[2].amount().to_string(), "600.00");
    }

    #[test]
    fn test_header_is_discarded_whatever_it_says() {
        let text = "01/01/2024,Not,1.00,Income\n02/01/2024,Kept,2.00,Income\n";
        let decoded = decode_csv(text).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].description(), "Kept");
    }

    #[test]
    fn test_unknown_kind_is_expense() {
        let text = "header\n01/01/2024,Regalo,10,income\n01/01/2024,Bonus,5,Income \n";
        let decoded = decode_csv(text).unwrap();
        assert!(decoded.iter().all(|m| m.is_expense()));
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let text = "header\n01/01/2024,Solo tre,10\n\n02/01/2024,Ok,1,Income\n";
        let decoded = decode_csv(text).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].description(), "Ok");
    }

    #[test]
    fn test_comma_in_description_shifts_columns() {
        let movement = Movement::expense(day(5), "Spesa,12", dec!(3)).unwrap();
        let decoded = decode_csv(&encode_csv(&[movement.clone()])).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].description(), "Spesa");
        assert_eq!(decoded[0].amount(), dec!(12));
        assert!(decoded[0].is_expense());
        assert_ne!(decoded[0], movement);
    }

    #[test]
    fn test_malformed_date_aborts() {
        let text = "header\n01/01/2024,Ok,1.00,Income\n2024-01-02,Bad,1.00,Income\n";
        let err = decode_csv(text).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_malformed_amount_aborts() {
        let text = "header\n01/01/2024,Ok,dieci,Income\n";
        assert!(decode_csv(text).unwrap_err().is_parse());
    }

    #[test]
    fn test_negative_amount_is_invalid_argument() {
        let text = "header\n01/01/2024,Storno,-5.00,Income\n";
        assert!(decode_csv(text).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_skip_malformed_mode() {
        let text = "header\n01/01/2024,Ok,1.00,Income\nxx/01/2024,Bad,1.00,Income\n03/01/2024,Ok2,2.00,Expense\n";
        let decoded = decode_csv_with(text, DecodeMode::SkipMalformed).unwrap();

        assert_eq!(decoded.movements.len(), 2);
        assert_eq!(decoded.skipped.len(), 1);
        assert_eq!(decoded.skipped[0].line_number, 3);
        assert!(decoded.skipped[0].reason.contains("invalid date"));
    }
}
