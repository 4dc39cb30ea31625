//! Limits shared by previews and reconciliation.

use serde::{Deserialize, Serialize};

/// Default number of source lines scanned for a preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Default maximum number of entries accepted by a single reconciliation.
pub const DEFAULT_BATCH_LIMIT: usize = 1000;

/// Independent preview and batch limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransferConfig {
    pub preview_limit: usize,
    pub batch_limit: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            batch_limit: DEFAULT_BATCH_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TransferConfig::default();
        assert_eq!(config.preview_limit, 10);
        assert_eq!(config.batch_limit, 1000);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: TransferConfig = serde_json::from_str(r#"{"batchLimit": 50}"#).unwrap();
        assert_eq!(config.batch_limit, 50);
        assert_eq!(config.preview_limit, DEFAULT_PREVIEW_LIMIT);
    }
}
