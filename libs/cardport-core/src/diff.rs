//! Version diffing between two deck snapshots.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::{CardChange, ChangeType, SnapshotEntry, VersionSnapshot};

/// Counts per change type plus the net quantity change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub net_quantity_change: i64,
}

impl DiffSummary {
    pub fn has_changes(&self) -> bool {
        self.added + self.removed + self.modified > 0
    }
}

/// Compare `old` against `new`, keyed by card id.
///
/// Output is sorted by card name, then card id. When a card id repeats
/// within one snapshot the later entry wins.
pub fn diff(old: &VersionSnapshot, new: &VersionSnapshot) -> Vec<CardChange> {
    let before = index(old);
    let after = index(new);
    let mut changes = Vec::with_capacity(before.len().max(after.len()));

    for (card_id, current) in &after {
        let record = match before.get(card_id) {
            Some(previous) if previous.quantity == current.quantity => {
                change(ChangeType::Unchanged, current, Some(previous.quantity), Some(current.quantity))
            }
            Some(previous) => {
                change(ChangeType::Modified, current, Some(previous.quantity), Some(current.quantity))
            }
            None => change(ChangeType::Added, current, None, Some(current.quantity)),
        };
        changes.push(record);
    }

    for (card_id, previous) in &before {
        if !after.contains_key(card_id) {
            changes.push(change(ChangeType::Removed, previous, Some(previous.quantity), None));
        }
    }

    changes.sort_by(|a, b| {
        a.card_name
            .cmp(&b.card_name)
            .then_with(|| a.card_id.cmp(&b.card_id))
    });

    tracing::debug!(changes = changes.len(), "diffed snapshots");
    changes
}

/// Tally a change list.
pub fn summarize(changes: &[CardChange]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for change in changes {
        match change.change_type {
            ChangeType::Added => summary.added += 1,
            ChangeType::Removed => summary.removed += 1,
            ChangeType::Modified => summary.modified += 1,
            ChangeType::Unchanged => summary.unchanged += 1,
        }
        summary.net_quantity_change += change.quantity_delta();
    }
    summary
}

fn index(snapshot: &VersionSnapshot) -> HashMap<&str, &SnapshotEntry> {
    snapshot
        .entries
        .iter()
        .map(|entry| (entry.card_id.as_str(), entry))
        .collect()
}

fn change(
    change_type: ChangeType,
    entry: &SnapshotEntry,
    old_quantity: Option<u32>,
    new_quantity: Option<u32>,
) -> CardChange {
    CardChange {
        change_type,
        card_id: entry.card_id.clone(),
        card_name: entry.card.name.clone(),
        card: entry.card.clone(),
        old_quantity,
        new_quantity,
        category: entry.category.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardDescriptor;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn entry(id: &str, name: &str, quantity: u32, category: &str) -> SnapshotEntry {
        SnapshotEntry {
            card_id: id.to_string(),
            card: CardDescriptor::named(name),
            quantity,
            category: category.to_string(),
        }
    }

    fn snapshot(entries: Vec<SnapshotEntry>) -> VersionSnapshot {
        VersionSnapshot::from(entries)
    }

    fn kinds(changes: &[CardChange]) -> Vec<(ChangeType, &str, Option<u32>, Option<u32>)> {
        changes
            .iter()
            .map(|c| (c.change_type, c.card_id.as_str(), c.old_quantity, c.new_quantity))
            .collect()
    }

    #[test]
    fn added_card_sorted_by_name() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, "main")]);
        let b = snapshot(vec![entry("X", "Zaku II", 2, "main"), entry("Y", "Gouf", 1, "main")]);

        assert_eq!(
            kinds(&diff(&a, &b)),
            vec![
                (ChangeType::Added, "Y", None, Some(1)),
                (ChangeType::Unchanged, "X", Some(2), Some(2)),
            ]
        );
    }

    #[test]
    fn modified_and_removed() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, "main"), entry("Z", "Dom", 3, "side")]);
        let b = snapshot(vec![entry("X", "Zaku II", 4, "main")]);

        assert_eq!(
            kinds(&diff(&a, &b)),
            vec![
                (ChangeType::Removed, "Z", Some(3), None),
                (ChangeType::Modified, "X", Some(2), Some(4)),
            ]
        );
    }

    #[test]
    fn category_prefers_new_snapshot() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, "side")]);
        let b = snapshot(vec![entry("X", "Zaku II", 2, "main")]);
        assert_eq!(diff(&a, &b)[0].category, "main");
    }

    #[test]
    fn equal_names_tie_break_on_id() {
        let b = snapshot(vec![entry("B", "Zaku II", 1, ""), entry("A", "Zaku II", 1, "")]);
        let ids: Vec<_> = diff(&VersionSnapshot::default(), &b)
            .into_iter()
            .map(|c| c.card_id)
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn later_duplicate_wins() {
        let a = snapshot(vec![entry("X", "Zaku II", 1, ""), entry("X", "Zaku II", 3, "")]);
        let b = snapshot(vec![entry("X", "Zaku II", 3, "")]);
        let changes = diff(&a, &b);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Unchanged);
    }

    #[test]
    fn diff_is_symmetric() {
        let a = snapshot(vec![
            entry("X", "Zaku II", 2, ""),
            entry("Y", "Gouf", 1, ""),
            entry("W", "Dom", 1, ""),
        ]);
        let b = snapshot(vec![
            entry("X", "Zaku II", 4, ""),
            entry("V", "Gelgoog", 2, ""),
            entry("W", "Dom", 1, ""),
        ]);

        let forward = diff(&a, &b);
        let backward = diff(&b, &a);
        assert_eq!(forward.len(), backward.len());

        for f in &forward {
            let r = backward.iter().find(|r| r.card_id == f.card_id).unwrap();
            let expected = match f.change_type {
                ChangeType::Added => ChangeType::Removed,
                ChangeType::Removed => ChangeType::Added,
                other => other,
            };
            assert_eq!(r.change_type, expected);
            assert_eq!(r.old_quantity, f.new_quantity);
            assert_eq!(r.new_quantity, f.old_quantity);
        }
    }

    #[test]
    fn every_card_appears_exactly_once() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, ""), entry("Y", "Gouf", 1, "")]);
        let b = snapshot(vec![entry("Y", "Gouf", 2, ""), entry("Z", "Dom", 1, "")]);
        let changes = diff(&a, &b);
        let ids: HashSet<_> = changes.iter().map(|c| c.card_id.as_str()).collect();
        assert_eq!(ids.len(), changes.len());
        assert_eq!(ids, HashSet::from(["X", "Y", "Z"]));
    }

    #[test]
    fn summary_counts_and_net_change() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, ""), entry("Y", "Gouf", 1, "")]);
        let b = snapshot(vec![entry("X", "Zaku II", 2, ""), entry("Y", "Gouf", 3, ""), entry("Z", "Dom", 1, "")]);
        let summary = summarize(&diff(&a, &b));
        assert_eq!(
            summary,
            DiffSummary {
                added: 1,
                removed: 0,
                modified: 1,
                unchanged: 1,
                net_quantity_change: 3,
            }
        );
        assert!(summary.has_changes());
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let a = snapshot(vec![entry("X", "Zaku II", 2, "")]);
        assert!(!summarize(&diff(&a, &a)).has_changes());
    }
}
