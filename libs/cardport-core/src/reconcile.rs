//! Reconciliation of parsed entries against existing holdings.
//!
//! Entries are processed sequentially in input order so `imported` and
//! `errors` line up with the original text. Per-entry failures never abort
//! the batch; only the upfront batch-size check does.

use async_trait::async_trait;

use crate::config::TransferConfig;
use crate::error::{CollaboratorError, Result, TransferError};
use crate::types::{
    CardEntry, ImportAction, ImportResult, ImportedCard, ResolvedCard, UpdatePolicy,
};

/// Maps a parsed entry to a concrete catalog card.
///
/// Matching precedence and tie-breaking belong to the implementation.
#[async_trait]
pub trait CardResolver: Send + Sync {
    async fn resolve(
        &self,
        entry: &CardEntry,
    ) -> std::result::Result<Option<ResolvedCard>, CollaboratorError>;
}

/// Persistence boundary for holdings quantities.
#[async_trait]
pub trait HoldingsStore: Send + Sync {
    async fn get(&self, card_id: &str) -> std::result::Result<Option<u32>, CollaboratorError>;

    async fn upsert(
        &mut self,
        card_id: &str,
        quantity: u32,
    ) -> std::result::Result<(), CollaboratorError>;
}

/// Applies entries to holdings under an update policy.
#[derive(Debug, Clone, Copy)]
pub struct ReconciliationEngine {
    batch_limit: usize,
}

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new(&TransferConfig::default())
    }
}

impl ReconciliationEngine {
    pub fn new(config: &TransferConfig) -> Self {
        Self {
            batch_limit: config.batch_limit,
        }
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    /// Reject a batch larger than the configured limit.
    pub fn check_batch(&self, count: usize) -> Result<()> {
        if count > self.batch_limit {
            return Err(TransferError::BatchTooLarge {
                count,
                limit: self.batch_limit,
            });
        }
        Ok(())
    }

    /// Reconcile `entries` against `holdings`.
    ///
    /// Returns `Err` only when the batch exceeds the limit, in which case
    /// nothing is resolved or written.
    pub async fn reconcile<R, H>(
        &self,
        entries: &[CardEntry],
        resolver: &R,
        holdings: &mut H,
        policy: UpdatePolicy,
    ) -> Result<ImportResult>
    where
        R: CardResolver + ?Sized,
        H: HoldingsStore + ?Sized,
    {
        self.check_batch(entries.len())?;

        let mut result = ImportResult::default();
        for entry in entries {
            match apply_entry(entry, resolver, holdings, policy).await {
                Outcome::Applied(imported) => {
                    result.success_count += 1;
                    result.imported.push(imported);
                }
                Outcome::Skipped => result.skipped_count += 1,
                Outcome::Failed(reason) => {
                    tracing::warn!(line = entry.source_line, card = %entry.card_name, %reason, "import entry failed");
                    result.failed_count += 1;
                    result.errors.push(reason);
                }
            }
        }

        tracing::info!(
            policy = policy.as_str(),
            success = result.success_count,
            skipped = result.skipped_count,
            failed = result.failed_count,
            "reconciliation finished"
        );
        Ok(result)
    }
}

enum Outcome {
    Applied(ImportedCard),
    Skipped,
    Failed(String),
}

async fn apply_entry<R, H>(
    entry: &CardEntry,
    resolver: &R,
    holdings: &mut H,
    policy: UpdatePolicy,
) -> Outcome
where
    R: CardResolver + ?Sized,
    H: HoldingsStore + ?Sized,
{
    let card = match resolver.resolve(entry).await {
        Ok(Some(card)) => card,
        Ok(None) => {
            return Outcome::Failed(format!(
                "Line {}: Card not found: {}",
                entry.source_line, entry.card_name
            ))
        }
        Err(e) => {
            return Outcome::Failed(format!(
                "Line {}: Could not look up {}: {}",
                entry.source_line, entry.card_name, e
            ))
        }
    };

    let existing = match holdings.get(&card.card_id).await {
        Ok(existing) => existing,
        Err(e) => {
            return Outcome::Failed(format!(
                "Line {}: Could not read holdings for {}: {}",
                entry.source_line, entry.card_name, e
            ))
        }
    };

    let (quantity, action) = match (existing, policy) {
        (Some(_), UpdatePolicy::Skip) => {
            tracing::debug!(card_id = %card.card_id, "holding exists, skipping");
            return Outcome::Skipped;
        }
        (Some(current), UpdatePolicy::Add) => {
            (current.saturating_add(entry.quantity), ImportAction::Updated)
        }
        (Some(_), UpdatePolicy::Replace) => (entry.quantity, ImportAction::Updated),
        (None, _) => (entry.quantity, ImportAction::Added),
    };

    if let Err(e) = holdings.upsert(&card.card_id, quantity).await {
        return Outcome::Failed(format!(
            "Line {}: Could not save {}: {}",
            entry.source_line, entry.card_name, e
        ));
    }

    Outcome::Applied(ImportedCard {
        card_name: entry.card_name.clone(),
        quantity: entry.quantity,
        action,
    })
}
