//! Format-aware parsing of pasted or uploaded card lists.
//!
//! Every non-skipped source line (or JSON array element) yields exactly one
//! result: either a validated [`CardEntry`] or a [`ParseError`] carrying the
//! 1-based line it came from.
//!
//! # Formats
//! ```text
//! csv:      Name,Quantity,Set,Set Number   (tab separated rows also accepted)
//! json:     [{"cardName": "...", "quantity": 2}]
//! decklist: 4 Card Name / 4x Card Name
//! ```

mod decklist;
mod delimited;
mod json;

use crate::error::ParseError;
use crate::types::{CardEntry, Format};

pub use decklist::is_skippable;
pub use delimited::{delimiter_for, looks_like_header};

/// Outcome for a single source line.
pub type ParseResult = std::result::Result<CardEntry, ParseError>;

/// Ordered per-line results of one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub results: Vec<ParseResult>,
}

impl ParseOutcome {
    pub fn entries(&self) -> impl Iterator<Item = &CardEntry> {
        self.results.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseError> {
        self.results.iter().filter_map(|r| r.as_ref().err())
    }

    pub fn entry_count(&self) -> usize {
        self.entries().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// The error that rejected the input as a whole, if any.
    pub fn file_error(&self) -> Option<&ParseError> {
        self.errors().find(|e| e.file_level)
    }

    /// Split into entries and errors, both in input order.
    pub fn split(self) -> (Vec<CardEntry>, Vec<ParseError>) {
        let mut entries = Vec::new();
        let mut errors = Vec::new();
        for result in self.results {
            match result {
                Ok(entry) => entries.push(entry),
                Err(error) => errors.push(error),
            }
        }
        (entries, errors)
    }
}

impl From<Vec<ParseResult>> for ParseOutcome {
    fn from(results: Vec<ParseResult>) -> Self {
        Self { results }
    }
}

/// Parse raw text in the given format.
///
/// Blank csv or decklist text has no lines to report on. Blank JSON text is
/// not a document at all and is rejected as a whole.
pub fn parse(format: Format, raw: &str) -> ParseOutcome {
    if raw.trim().is_empty() && format != Format::Json {
        return ParseOutcome::default();
    }

    let results = match format {
        Format::Csv => delimited::parse_delimited(raw),
        Format::Json => json::parse_json_text(raw),
        Format::Decklist => decklist::parse_decklist(raw),
    };
    let outcome = ParseOutcome::from(results);

    tracing::debug!(
        format = %format,
        entries = outcome.entry_count(),
        errors = outcome.error_count(),
        "parsed card input"
    );
    outcome
}

/// Parse an already-decoded JSON value.
pub fn parse_json_value(value: &serde_json::Value) -> ParseOutcome {
    ParseOutcome::from(json::parse_json_value(value))
}

/// Source line a result was produced from.
pub(crate) fn line_of(result: &ParseResult) -> usize {
    match result {
        Ok(entry) => entry.source_line,
        Err(error) => error.line,
    }
}

/// Read a quantity column as an integer.
///
/// Anything that is not a plain integer reads as 0, which callers then
/// reject through the same path as a literal zero.
pub(crate) fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse::<i64>().unwrap_or(0)
}

/// Narrow a parsed quantity to a positive count.
pub(crate) fn positive_quantity(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|quantity| *quantity > 0)
}

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
