//! Export formatting, the inverse of the parser.
//!
//! Output re-imports through [`crate::parser::parse`] with the same format:
//! CSV carries a header row the parser skips, JSON uses the parser's field
//! names, and deck lists use `N Name` lines.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, TransferError};
use crate::types::{ExportOptions, Format, HoldingRecord};

/// Serialize holdings in the format named by `options`.
pub fn export(holdings: &[HoldingRecord], options: &ExportOptions) -> Result<String> {
    let selected: Vec<&HoldingRecord> = holdings
        .iter()
        .filter(|h| !options.only_owned || h.quantity > 0)
        .collect();

    tracing::debug!(
        format = %options.format,
        total = holdings.len(),
        exported = selected.len(),
        "exporting holdings"
    );

    match options.format {
        Format::Csv => export_csv(&selected, options),
        Format::Json => export_json(&selected, options),
        Format::Decklist => Ok(export_decklist(&selected, options)),
    }
}

fn export_csv(holdings: &[&HoldingRecord], options: &ExportOptions) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut header = vec!["Name", "Quantity", "Set", "Set Number"];
    if options.include_conditions {
        header.push("Condition");
    }
    if options.include_values {
        header.push("Value");
    }
    if options.include_metadata {
        header.extend(["Card ID", "Added At", "Updated At"]);
    }
    writer.write_record(&header)?;

    for holding in holdings {
        let mut row = vec![
            holding.card_name.clone(),
            holding.quantity.to_string(),
            holding.set_name.clone().unwrap_or_default(),
            holding.set_number.clone().unwrap_or_default(),
        ];
        if options.include_conditions {
            row.push(holding.condition.clone().unwrap_or_default());
        }
        if options.include_values {
            row.push(holding.value.map(|v| format!("{:.2}", v)).unwrap_or_default());
        }
        if options.include_metadata {
            row.push(holding.card_id.clone());
            row.push(timestamp(holding.added_at));
            row.push(timestamp(holding.updated_at));
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|e| {
        TransferError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    String::from_utf8(bytes)
        .map_err(|e| TransferError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedCard<'a> {
    card_name: &'a str,
    quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    set_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    added_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl<'a> ExportedCard<'a> {
    fn new(holding: &'a HoldingRecord, options: &ExportOptions) -> Self {
        let metadata = options.include_metadata;
        Self {
            card_name: &holding.card_name,
            quantity: holding.quantity,
            set_name: holding.set_name.as_deref(),
            set_number: holding.set_number.as_deref(),
            condition: holding
                .condition
                .as_deref()
                .filter(|_| options.include_conditions),
            value: holding.value.filter(|_| options.include_values),
            card_id: Some(holding.card_id.as_str()).filter(|_| metadata),
            added_at: holding.added_at.filter(|_| metadata),
            updated_at: holding.updated_at.filter(|_| metadata),
        }
    }
}

fn export_json(holdings: &[&HoldingRecord], options: &ExportOptions) -> Result<String> {
    let cards: Vec<ExportedCard<'_>> = holdings
        .iter()
        .map(|h| ExportedCard::new(h, options))
        .collect();
    Ok(serde_json::to_string_pretty(&cards)?)
}

/// Deck lists only carry quantity and name; other flags do not apply.
fn export_decklist(holdings: &[&HoldingRecord], options: &ExportOptions) -> String {
    let mut out = String::new();
    if let Some(name) = options.custom_name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        out.push_str(&format!("// {}\n", name));
    }
    for holding in holdings {
        out.push_str(&format!("{} {}\n", holding.quantity, holding.card_name));
    }
    out
}
