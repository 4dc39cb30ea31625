//! Core card import/export library shared by cardport hosts.
//!
//! Provides:
//! - Format-aware parsers for CSV/TSV, JSON and deck-list text
//! - Bounded previews of parser output
//! - Reconciliation of parsed entries against existing holdings
//! - Export formatting back into the supported text formats
//! - Version diffing between two deck snapshots

pub mod catalog;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;
pub mod parser;
pub mod preview;
pub mod reconcile;
pub mod types;

pub use catalog::{InMemoryCatalog, InMemoryHoldings};
pub use config::TransferConfig;
pub use diff::{diff, summarize, DiffSummary};
pub use error::{CollaboratorError, ParseError, Result, TransferError};
pub use export::export;
pub use parser::{parse, parse_json_value, ParseOutcome, ParseResult};
pub use preview::{preview, preview_text, Preview};
pub use reconcile::{CardResolver, HoldingsStore, ReconciliationEngine};
pub use types::{
    CardChange, CardDescriptor, CardEntry, ChangeType, ExportOptions, Format, HoldingRecord,
    ImportAction, ImportResult, ImportedCard, ResolvedCard, SnapshotEntry, UpdatePolicy,
    VersionSnapshot,
};
