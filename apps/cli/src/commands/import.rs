//! Import command: parse, reconcile against the holdings file, save.

use cardport_core::{parse, ImportResult, ParseError, ReconciliationEngine, TransferConfig};
use serde::Serialize;

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::store::{load_catalog, read_text, JsonHoldingsStore};

/// Parse diagnostics plus the reconciliation summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub parse_errors: Vec<ParseError>,
    pub result: ImportResult,
}

pub async fn import(args: &ImportArgs, config: &TransferConfig) -> Result<ImportReport> {
    let raw = read_text(&args.input)?;
    let outcome = parse(args.format, &raw);

    if let Some(error) = outcome.file_error() {
        return Err(CliError::InputRejected(format!(
            "{}: {}",
            args.input.display(),
            error
        )));
    }

    let (entries, parse_errors) = outcome.split();
    if args.strict && !parse_errors.is_empty() {
        return Err(CliError::InputRejected(format!(
            "{} line(s) rejected, first at {}",
            parse_errors.len(),
            parse_errors[0]
        )));
    }

    let engine = ReconciliationEngine::new(&TransferConfig {
        batch_limit: args.batch_limit.unwrap_or(config.batch_limit),
        ..*config
    });
    engine.check_batch(entries.len())?;

    let catalog = load_catalog(&args.catalog)?;
    let mut store = JsonHoldingsStore::load(&args.holdings, &catalog)?;

    tracing::info!(
        entries = entries.len(),
        rejected = parse_errors.len(),
        policy = args.policy.as_str(),
        batch_limit = engine.batch_limit(),
        "importing"
    );
    let result = engine
        .reconcile(&entries, &catalog, &mut store, args.policy)
        .await?;

    if result.success_count > 0 {
        store.save()?;
    }

    Ok(ImportReport {
        parse_errors,
        result,
    })
}
