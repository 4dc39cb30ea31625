//! In-memory reference collaborators for reconciliation.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::CollaboratorError;
use crate::reconcile::{CardResolver, HoldingsStore};
use crate::types::{CardEntry, ResolvedCard};

/// Case-fold and collapse whitespace for name comparison.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Catalog resolver over a fixed card list.
///
/// Lookup order: `cardId`, then set number plus set name, then exact name
/// (case-insensitive, whitespace-normalized). When several cards share a key
/// the earliest inserted one wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    cards: Vec<ResolvedCard>,
    by_id: HashMap<String, usize>,
    by_set: HashMap<(String, String), usize>,
    by_name: HashMap<String, usize>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, card: ResolvedCard) {
        let idx = self.cards.len();
        self.by_id.entry(card.card_id.clone()).or_insert(idx);
        if let (Some(set_name), Some(set_number)) = (&card.set_name, &card.set_number) {
            self.by_set
                .entry((normalize(set_name), normalize(set_number)))
                .or_insert(idx);
        }
        self.by_name.entry(normalize(&card.name)).or_insert(idx);
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card with exactly this id.
    pub fn get(&self, card_id: &str) -> Option<&ResolvedCard> {
        self.by_id.get(card_id).map(|idx| &self.cards[*idx])
    }

    /// Synchronous lookup used by the resolver impl.
    pub fn lookup(&self, entry: &CardEntry) -> Option<&ResolvedCard> {
        let by_id = entry
            .card_id
            .as_ref()
            .and_then(|id| self.by_id.get(id.trim()));

        let by_set = || match (&entry.set_name, &entry.set_number) {
            (Some(set_name), Some(set_number)) => self
                .by_set
                .get(&(normalize(set_name), normalize(set_number))),
            _ => None,
        };

        by_id
            .or_else(by_set)
            .or_else(|| self.by_name.get(&normalize(&entry.card_name)))
            .map(|idx| &self.cards[*idx])
    }
}

impl FromIterator<ResolvedCard> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = ResolvedCard>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.insert(card);
        }
        catalog
    }
}

#[async_trait]
impl CardResolver for InMemoryCatalog {
    async fn resolve(&self, entry: &CardEntry) -> Result<Option<ResolvedCard>, CollaboratorError> {
        Ok(self.lookup(entry).cloned())
    }
}

/// Holdings quantities keyed by card id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryHoldings {
    quantities: HashMap<String, u32>,
}

impl InMemoryHoldings {
    pub fn quantity(&self, card_id: &str) -> Option<u32> {
        self.quantities.get(card_id).copied()
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

impl FromIterator<(String, u32)> for InMemoryHoldings {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl HoldingsStore for InMemoryHoldings {
    async fn get(&self, card_id: &str) -> Result<Option<u32>, CollaboratorError> {
        Ok(self.quantity(card_id))
    }

    async fn upsert(&mut self, card_id: &str, quantity: u32) -> Result<(), CollaboratorError> {
        self.quantities.insert(card_id.to_string(), quantity);
        Ok(())
    }
}
