//! CSV and tab-separated rows.

use super::{non_blank, parse_quantity, positive_quantity, ParseResult};
use crate::error::ParseError;
use crate::types::CardEntry;

const HEADER_MARKERS: [&str; 3] = ["name", "card", "quantity"];

/// Whether a line reads like a column header row.
pub fn looks_like_header(line: &str) -> bool {
    let lowered = line.to_lowercase();
    HEADER_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Delimiter for a row: tab when the row contains one, comma otherwise.
pub fn delimiter_for(line: &str) -> u8 {
    if line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

pub(super) fn parse_delimited(raw: &str) -> Vec<ParseResult> {
    let mut results = Vec::new();
    let mut seen_first = false;

    for (idx, line) in raw.lines().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        if !seen_first {
            seen_first = true;
            if looks_like_header(line) {
                continue;
            }
        }

        results.push(parse_row(line, line_num));
    }

    results
}

fn parse_row(line: &str, line_num: usize) -> ParseResult {
    let columns = split_row(line).map_err(|e| {
        ParseError::new(line_num, "Malformed row").with_suggestion(e.to_string())
    })?;

    if columns.len() < 2 {
        return Err(ParseError::new(line_num, "Insufficient columns")
            .with_suggestion("name and quantity required"));
    }

    let name = strip_quotes(&columns[0]);
    if name.is_empty() {
        return Err(ParseError::new(line_num, "Missing card name"));
    }

    let quantity = positive_quantity(parse_quantity(&columns[1])).ok_or_else(|| {
        ParseError::new(line_num, "Invalid quantity").with_suggestion("must be positive")
    })?;

    let mut entry = CardEntry::named(line_num, name.to_string(), quantity);
    entry.set_name = columns.get(2).and_then(|c| non_blank(c));
    entry.set_number = columns.get(3).and_then(|c| non_blank(c));
    Ok(entry)
}

fn split_row(line: &str) -> Result<Vec<String>, csv::Error> {
    let delimiter = delimiter_for(line);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;

    // An unclosed quote swallows the rest of the row into one field.
    let separator = char::from(delimiter);
    if record.len() < 2 && line.contains(separator) {
        return Ok(line.split(separator).map(|c| c.trim().to_string()).collect());
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// Drop one surrounding quote character from each end.
fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    let value = value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value);
    value.trim()
}
