//! File-backed collaborators: catalog, holdings and snapshot files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cardport_core::{
    CollaboratorError, HoldingRecord, HoldingsStore, InMemoryCatalog, ResolvedCard,
    VersionSnapshot,
};
use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::{CliError, Result};

pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, content).map_err(write_err)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Catalog file: JSON array of `{cardId, name, setName?, setNumber?}`.
pub fn load_catalog(path: &Path) -> Result<InMemoryCatalog> {
    let cards: Vec<ResolvedCard> = read_json(path)?;
    let catalog: InMemoryCatalog = cards.into_iter().collect();
    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "catalog is empty, no card will resolve");
    }
    tracing::debug!(cards = catalog.len(), path = %path.display(), "loaded catalog");
    Ok(catalog)
}

/// Holdings file; a missing file means no holdings yet.
pub fn load_holdings(path: &Path) -> Result<Vec<HoldingRecord>> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "holdings file not found, starting empty");
        return Ok(Vec::new());
    }
    read_json(path)
}

pub fn load_snapshot(path: &Path) -> Result<VersionSnapshot> {
    read_json(path)
}

/// Holdings kept in a JSON file, written back by [`JsonHoldingsStore::save`].
///
/// New holdings take their name and set details from the catalog the
/// entries were resolved against.
pub struct JsonHoldingsStore<'a> {
    path: PathBuf,
    records: Vec<HoldingRecord>,
    index: HashMap<String, usize>,
    catalog: &'a InMemoryCatalog,
}

impl<'a> JsonHoldingsStore<'a> {
    pub fn load(path: &Path, catalog: &'a InMemoryCatalog) -> Result<Self> {
        let records = load_holdings(path)?;
        let index = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.card_id.clone(), idx))
            .collect();
        Ok(Self {
            path: path.to_path_buf(),
            records,
            index,
            catalog,
        })
    }

    pub fn records(&self) -> &[HoldingRecord] {
        &self.records
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.records).map_err(|source| CliError::Json {
            path: self.path.clone(),
            source,
        })?;
        write_text(&self.path, &content)?;
        tracing::info!(holdings = self.records.len(), path = %self.path.display(), "saved holdings");
        Ok(())
    }
}

#[async_trait]
impl<'a> HoldingsStore for JsonHoldingsStore<'a> {
    async fn get(&self, card_id: &str) -> std::result::Result<Option<u32>, CollaboratorError> {
        Ok(self.index.get(card_id).map(|idx| self.records[*idx].quantity))
    }

    async fn upsert(
        &mut self,
        card_id: &str,
        quantity: u32,
    ) -> std::result::Result<(), CollaboratorError> {
        let now = Utc::now();

        if let Some(idx) = self.index.get(card_id) {
            let record = &mut self.records[*idx];
            record.quantity = quantity;
            record.updated_at = Some(now);
            return Ok(());
        }

        let card = self
            .catalog
            .get(card_id)
            .ok_or_else(|| CollaboratorError::Write(format!("card {} is not in the catalog", card_id)))?;

        self.index.insert(card_id.to_string(), self.records.len());
        self.records.push(HoldingRecord {
            card_id: card_id.to_string(),
            card_name: card.name.clone(),
            quantity,
            set_name: card.set_name.clone(),
            set_number: card.set_number.clone(),
            condition: None,
            value: None,
            added_at: Some(now),
            updated_at: Some(now),
        });
        Ok(())
    }
}
