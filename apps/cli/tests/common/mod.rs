//! Shared fixtures for command tests.
//!
//! Each test gets its own temporary workspace holding a small catalog file.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let workspace = Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        };
        workspace.write("catalog.json", &sample_catalog());
        workspace
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).expect("read fixture")
    }
}

pub fn sample_catalog() -> String {
    json!([
        { "cardId": "GD01-001", "name": "RX-78-2 Gundam", "setName": "Origins", "setNumber": "001" },
        { "cardId": "GD01-002", "name": "Char's Zaku II", "setName": "Origins", "setNumber": "002" },
        { "cardId": "GD01-003", "name": "Nu Gundam", "setName": "Origins", "setNumber": "003" },
    ])
    .to_string()
}

/// Deck list with `count` lines cycling through the catalog.
pub fn sample_decklist(count: usize) -> String {
    let names = ["RX-78-2 Gundam", "Char's Zaku II", "Nu Gundam"];
    (0..count)
        .map(|i| format!("1 {}", names[i % names.len()]))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn snapshot(entries: &[(&str, &str, u32)]) -> String {
    let items: Vec<_> = entries
        .iter()
        .map(|(id, name, quantity)| {
            json!({ "cardId": id, "card": { "name": name }, "quantity": quantity, "category": "main" })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}
