//! Delimited store codec - between a record collection and header-first text.
//!
//! The durable format is one header line naming the fields in order, then
//! one line per record, values separated by a comma. Values are written in
//! their natural string form with no quoting or escaping: a value containing
//! the delimiter or a line break corrupts the format. That is a documented
//! limitation of the format, not something this codec papers over.

use crate::record::Record;

/// Field separator within a line.
pub const DELIMITER: char = ',';

/// Encode a collection as delimited text: header line, then one line per
/// record in collection order.
pub fn encode<R: Record>(records: &[R]) -> String {
    let delimiter = DELIMITER.to_string();
    let mut out = String::new();
    out.push_str(&R::FIELDS.join(&delimiter));
    out.push('\n');
    for record in records {
        out.push_str(&record.to_row().join(&delimiter));
        out.push('\n');
    }
    out
}

/// Decode delimited text into records.
///
/// Empty lines are skipped, the first remaining line (the header) is
/// discarded, and each value is trimmed of surrounding whitespace. Rows with
/// too few values are padded with empty strings; extra values are dropped.
/// Header-only or empty input decodes to an empty collection. Malformed
/// numeric values become the numeric zero of their field, never an error.
pub fn decode<R: Record>(text: &str) -> Vec<R> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .skip(1)
        .map(|line| {
            let mut values: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
            values.resize(R::FIELDS.len(), "");
            R::from_row(&values)
        })
        .collect()
}
