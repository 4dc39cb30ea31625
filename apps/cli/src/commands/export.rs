//! Export command.

use cardport_core::{export, ExportOptions};

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::store::load_holdings;

pub fn options_from(args: &ExportArgs) -> ExportOptions {
    ExportOptions {
        format: args.format,
        include_metadata: args.include_metadata,
        include_conditions: args.include_conditions,
        include_values: args.include_values,
        only_owned: args.only_owned,
        custom_name: args.name.clone(),
    }
}

/// Render the holdings file in the requested format.
pub fn render(args: &ExportArgs) -> Result<String> {
    let holdings = load_holdings(&args.holdings)?;
    Ok(export(&holdings, &options_from(args))?)
}
