//! Environment-driven limits.

use cardport_core::TransferConfig;

use crate::error::{CliError, Result};

pub const PREVIEW_LIMIT_VAR: &str = "CARDPORT_PREVIEW_LIMIT";
pub const BATCH_LIMIT_VAR: &str = "CARDPORT_BATCH_LIMIT";

/// Load limits from the process environment (after `.env`).
pub fn from_env() -> Result<TransferConfig> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Load limits through an arbitrary variable lookup.
pub fn from_lookup<F>(lookup: F) -> Result<TransferConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = TransferConfig::default();
    if let Some(value) = read_limit(&lookup, PREVIEW_LIMIT_VAR)? {
        config.preview_limit = value;
    }
    if let Some(value) = read_limit(&lookup, BATCH_LIMIT_VAR)? {
        config.batch_limit = value;
    }
    Ok(config)
}

fn read_limit<F>(lookup: &F, key: &str) -> Result<Option<usize>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| CliError::Config(format!("{} must be a non-negative integer, got {:?}", key, raw))),
    }
}
