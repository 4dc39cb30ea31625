//! Bounded previews of parser output.
//!
//! A preview scans a window of the first `limit` source lines (or JSON array
//! elements) rather than keeping the first `limit` results, so a burst of
//! early errors shows up even when later lines would parse fine.

use serde::Serialize;

use crate::error::ParseError;
use crate::parser::{self, line_of, ParseOutcome};
use crate::types::{CardEntry, Format};

/// Capped view of a parse run for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub entries: Vec<CardEntry>,
    pub errors: Vec<ParseError>,
    /// Source lines (or JSON array elements) in the whole input.
    pub total_lines: usize,
    /// The input continues past the scanned window.
    pub truncated: bool,
}

/// Slice already-parsed results down to the first `limit` source lines.
///
/// Errors that reject the input as a whole are kept whatever the window.
/// `total_lines` is the highest source line seen.
pub fn preview(outcome: &ParseOutcome, limit: usize) -> Preview {
    let mut preview = Preview::default();

    for result in &outcome.results {
        let line = line_of(result);
        preview.total_lines = preview.total_lines.max(line);
        match result {
            Err(error) if error.file_level => preview.errors.push(error.clone()),
            _ if line > limit => preview.truncated = true,
            Ok(entry) => preview.entries.push(entry.clone()),
            Err(error) => preview.errors.push(error.clone()),
        }
    }

    preview
}

/// Parse only the first `limit` source lines of `raw`.
pub fn preview_text(format: Format, raw: &str, limit: usize) -> Preview {
    match format {
        Format::Json => preview_json(raw, limit),
        Format::Csv | Format::Decklist => {
            let total = raw.lines().count();
            let window = raw.lines().take(limit).collect::<Vec<_>>().join("\n");
            let mut preview = preview(&parser::parse(format, &window), limit);
            preview.total_lines = total;
            preview.truncated = total > limit;
            preview
        }
    }
}

fn preview_json(raw: &str, limit: usize) -> Preview {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => {
            let total = items.len();
            let window = serde_json::Value::Array(items.into_iter().take(limit).collect());
            let mut preview = preview(&parser::parse_json_value(&window), limit);
            preview.total_lines = total;
            preview.truncated = total > limit;
            preview
        }
        // Malformed or non-array input is a single file-level error either way.
        _ => preview(&parser::parse(Format::Json, raw), limit),
    }
}
