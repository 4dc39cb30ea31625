//! Preview and validate commands.

use cardport_core::{parse, preview_text, ParseError, Preview, TransferConfig};
use serde::Serialize;

use crate::cli::{PreviewArgs, ValidateArgs};
use crate::error::Result;
use crate::store::read_text;

/// Windowed preview of an input file.
pub fn preview(args: &PreviewArgs, config: &TransferConfig) -> Result<Preview> {
    let raw = read_text(&args.input)?;
    let limit = args.limit.unwrap_or(config.preview_limit);
    Ok(preview_text(args.format, &raw, limit))
}

/// Full-file validation result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid_entries: usize,
    pub errors: Vec<ParseError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let raw = read_text(&args.input)?;
    let (entries, errors) = parse(args.format, &raw).split();
    tracing::info!(
        input = %args.input.display(),
        entries = entries.len(),
        errors = errors.len(),
        "validated input"
    );
    Ok(ValidationReport {
        valid_entries: entries.len(),
        errors,
    })
}
