//! Diff command.

use cardport_core::{diff, summarize, CardChange, ChangeType, DiffSummary};
use serde::Serialize;

use crate::cli::DiffArgs;
use crate::error::Result;
use crate::store::load_snapshot;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub summary: DiffSummary,
    pub changes: Vec<CardChange>,
}

pub fn diff_files(args: &DiffArgs) -> Result<DiffReport> {
    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;

    let mut changes = diff(&old, &new);
    let summary = summarize(&changes);
    if args.changes_only {
        changes.retain(|c| c.change_type != ChangeType::Unchanged);
    }

    tracing::info!(
        added = summary.added,
        removed = summary.removed,
        modified = summary.modified,
        "compared snapshots"
    );
    Ok(DiffReport { summary, changes })
}
