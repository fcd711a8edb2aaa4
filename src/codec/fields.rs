//! Line and field handling shared by both ledger formats
//!
//! Both formats are "one movement per line, four delimited fields" with no
//! quoting. Lines are read with the `csv` crate, quoting disabled, so a quote
//! character is ordinary text and a delimiter always starts a new field.

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{BilancioError, BilancioResult};
use crate::models::{parse_amount, parse_date, Movement, MovementKind};

use super::{DecodeMode, Decoded, SkippedLine};

/// Fields every movement line carries: date, description, amount, kind
pub(crate) const FIELD_COUNT: usize = 4;

/// One line of a ledger document, split into fields
#[derive(Debug)]
pub(crate) struct FieldLine {
    /// 1-based line number in the whole document
    pub line_number: usize,
    pub fields: Vec<String>,
}

/// Drop the first line of `text`, returning the rest
///
/// A line ends at `\n`, `\r` or `\r\n`. A document with a single line (or
/// none) has an empty body.
pub(crate) fn skip_first_line(text: &str) -> &str {
    match text.find(['\n', '\r']) {
        Some(end) => {
            let rest = &text[end..];
            rest.strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .or_else(|| rest.strip_prefix('\r'))
                .unwrap_or(rest)
        }
        None => "",
    }
}

/// Split `body` into delimited lines, keeping those with at least four fields
///
/// `first_line` is the line number of the first line of `body` in the whole
/// document. Empty trailing fields are dropped before counting, so
/// `a,b,c,` has three fields. Blank lines and short lines are skipped.
pub(crate) fn read_lines(
    body: &str,
    delimiter: u8,
    first_line: usize,
) -> BilancioResult<Vec<FieldLine>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quoting(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut counter = LineCounter::new(body.as_bytes(), first_line);
    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| BilancioError::Parse(e.to_string()))?;
        let line_number = match record.position() {
            Some(position) => counter.line_at(position.byte() as usize),
            None => first_line,
        };

        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        if fields.len() < FIELD_COUNT {
            debug!(line_number, fields = fields.len(), "skipping short line");
            continue;
        }
        lines.push(FieldLine {
            line_number,
            fields,
        });
    }

    Ok(lines)
}

/// Walks forward through a document turning byte offsets into line numbers
///
/// The reader reports a record at the end of the previous one, before any
/// blank lines it passed over, so terminators at the offset are skipped first.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a [u8], first_line: usize) -> Self {
        Self {
            text,
            offset: 0,
            line: first_line,
        }
    }

    fn line_at(&mut self, byte: usize) -> usize {
        let mut start = byte.max(self.offset);
        while matches!(self.text.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }

        for i in self.offset..start.min(self.text.len()) {
            match self.text[i] {
                b'\n' => self.line += 1,
                b'\r' if self.text.get(i + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
        }
        self.offset = start;
        self.line
    }
}

/// Build a movement from the first four fields of a line
///
/// Extra fields are ignored. `unescape` is applied to the description.
pub(crate) fn parse_movement(
    line: &FieldLine,
    unescape: impl Fn(&str) -> String,
) -> BilancioResult<Movement> {
    let date = parse_date(&line.fields[0])?;
    let description = unescape(&line.fields[1]);
    let amount = parse_amount(&line.fields[2])?;
    let kind = MovementKind::from_wire(&line.fields[3]);

    Movement::from_parts(kind, Some(date), Some(description), Some(amount))
}

/// Turn split lines into movements according to `mode`
///
/// In strict mode the first bad line aborts the whole decode and nothing is
/// returned. In skip mode bad lines are reported in [`Decoded::skipped`].
pub(crate) fn decode_lines(
    lines: Vec<FieldLine>,
    unescape: impl Fn(&str) -> String,
    mode: DecodeMode,
) -> BilancioResult<Decoded> {
    let mut decoded = Decoded::default();

    for line in lines {
        match parse_movement(&line, &unescape) {
            Ok(movement) => decoded.movements.push(movement),
            Err(e) => {
                let e = e.at_line(line.line_number);
                match mode {
                    DecodeMode::Strict => return Err(e),
                    DecodeMode::SkipMalformed => {
                        warn!(line_number = line.line_number, error = %e, "skipping malformed line");
                        decoded.skipped.push(SkippedLine {
                            line_number: line.line_number,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(lines: &[FieldLine]) -> Vec<Vec<&str>> {
        lines
            .iter()
            .map(|l| l.fields.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn test_skip_first_line() {
        assert_eq!(skip_first_line("header\nrow"), "row");
        assert_eq!(skip_first_line("header\r\nrow\r\n"), "row\r\n");
        assert_eq!(skip_first_line("\nrow"), "row");
        assert_eq!(skip_first_line("only header"), "");
        assert_eq!(skip_first_line(""), "");
    }

    #[test]
    fn test_read_lines_splits_without_quoting() {
        let lines = read_lines("a,\"b\",c,d\n", b',', 1).unwrap();
        assert_eq!(fields(&lines), vec![vec!["a", "\"b\"", "c", "d"]]);
    }

    #[test]
    fn test_read_lines_skips_short_and_blank_lines() {
        let body = "a,b,c\n\na,b,c,d,e\n";
        let lines = read_lines(body, b',', 1).unwrap();
        assert_eq!(fields(&lines), vec![vec!["a", "b", "c", "d", "e"]]);
        assert_eq!(lines[0].line_number, 3);
    }

    #[test]
    fn test_trailing_empty_fields_are_dropped() {
        let lines = read_lines("a,b,c,\na,,c,d\n", b',', 1).unwrap();
        assert_eq!(fields(&lines), vec![vec!["a", "", "c", "d"]]);
    }

    #[test]
    fn test_line_numbers_after_blank_lines() {
        let body = "a,b,c,d\r\n\r\n\na,b,c,d\ra,b,c,d\n";
        let lines = read_lines(body, b',', 2).unwrap();
        let numbers: Vec<_> = lines.iter().map(|l| l.line_number).collect();
        assert_eq!(numbers, vec![2, 5, 6]);
    }

    #[test]
    fn test_line_numbers_offset() {
        let lines = read_lines("a\tb\tc\td\n", b'\t', 2).unwrap();
        assert_eq!(lines[0].line_number, 2);
    }
}
