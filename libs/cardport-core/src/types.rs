//! Core types for card import, export and diffing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TransferError;

/// Text format understood by the parser and export formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Comma or tab separated rows.
    Csv,
    /// Array of card objects.
    Json,
    /// `N Name` / `Nx Name` lines.
    Decklist,
}

impl Format {
    /// Get the format identifier as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Decklist => "decklist",
        }
    }

    /// All supported formats.
    pub fn all() -> &'static [Format] {
        &[Format::Csv, Format::Json, Format::Decklist]
    }
}

impl FromStr for Format {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "tsv" | "tab" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "decklist" | "deck" | "txt" | "text" => Ok(Self::Decklist),
            _ => Err(TransferError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated card record produced from one input line or object.
///
/// The parser only builds an entry once the name is non-empty and the
/// quantity is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    pub source_line: usize,
    pub card_name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
}

impl CardEntry {
    pub(crate) fn named(source_line: usize, card_name: String, quantity: u32) -> Self {
        Self {
            source_line,
            card_name,
            quantity,
            set_name: None,
            set_number: None,
            card_id: None,
        }
    }
}

/// How a matched holding's quantity is combined with an incoming entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    Add,
    Replace,
    Skip,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self::Add
    }
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Skip => "skip",
        }
    }
}

impl FromStr for UpdatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown update policy: {}", other)),
        }
    }
}

/// Catalog card an entry resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCard {
    pub card_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<String>,
}

/// What reconciliation did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Added,
    Updated,
}

/// One successfully applied entry.
///
/// `quantity` is the incoming entry's quantity, not the merged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedCard {
    pub card_name: String,
    pub quantity: u32,
    pub action: ImportAction,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success_count: usize,
    pub failed_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<String>,
    pub imported: Vec<ImportedCard>,
}

impl ImportResult {
    /// Number of entries that reached reconciliation.
    pub fn total(&self) -> usize {
        self.success_count + self.failed_count + self.skipped_count
    }

    /// First `max` error strings, for summary display.
    pub fn truncated_errors(&self, max: usize) -> &[String] {
        &self.errors[..self.errors.len().min(max)]
    }
}

/// A stored holding, as handed to the export formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    pub card_id: String,
    pub card_name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Export options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: Format,
    #[serde(default)]
    pub include_metadata: bool,
    #[serde(default)]
    pub include_conditions: bool,
    #[serde(default)]
    pub include_values: bool,
    #[serde(default)]
    pub only_owned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
}

impl ExportOptions {
    /// Options for `format` with every flag off.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            include_metadata: false,
            include_conditions: false,
            include_values: false,
            only_owned: false,
            custom_name: None,
        }
    }
}

/// Descriptive card data carried by snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_number: Option<String>,
}

impl CardDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set_name: None,
            set_number: None,
        }
    }
}

/// One card in a stored deck version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub card_id: String,
    pub card: CardDescriptor,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
}

/// A point-in-time version of a deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionSnapshot {
    pub entries: Vec<SnapshotEntry>,
}

impl From<Vec<SnapshotEntry>> for VersionSnapshot {
    fn from(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }
}

/// Kind of change between two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// Change for one card between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardChange {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub card_id: String,
    pub card_name: String,
    pub card: CardDescriptor,
    pub old_quantity: Option<u32>,
    pub new_quantity: Option<u32>,
    pub category: String,
}

impl CardChange {
    /// New quantity minus old quantity, with absent counted as zero.
    pub fn quantity_delta(&self) -> i64 {
        i64::from(self.new_quantity.unwrap_or(0)) - i64::from(self.old_quantity.unwrap_or(0))
    }
}
