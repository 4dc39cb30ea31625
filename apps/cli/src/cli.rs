//! Command-line arguments.

use std::path::PathBuf;

use cardport_core::{Format, UpdatePolicy};
use clap::{Args, Parser, Subcommand};

/// Bulk import, export and diff card collections and deck lists
#[derive(Parser, Debug)]
#[command(name = "cardport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the first lines of an input file as they would import
    Preview(PreviewArgs),
    /// Parse a whole input file and report every rejected line
    Validate(ValidateArgs),
    /// Import an input file into a holdings file
    Import(ImportArgs),
    /// Export a holdings file
    Export(ExportArgs),
    /// Compare two deck snapshots
    Diff(DiffArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Input format: csv, json or decklist
    #[arg(short, long, value_parser = parse_format)]
    pub format: Format,

    /// Input file
    pub input: PathBuf,

    /// Number of source lines to scan (defaults to CARDPORT_PREVIEW_LIMIT or 10)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Input format: csv, json or decklist
    #[arg(short, long, value_parser = parse_format)]
    pub format: Format,

    /// Input file
    pub input: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Input format: csv, json or decklist
    #[arg(short, long, value_parser = parse_format)]
    pub format: Format,

    /// Input file
    pub input: PathBuf,

    /// Catalog file used to resolve card names
    #[arg(long)]
    pub catalog: PathBuf,

    /// Holdings file to update (created if missing)
    #[arg(long)]
    pub holdings: PathBuf,

    /// How to combine with cards already held: add, replace or skip
    #[arg(long, default_value = "add", value_parser = parse_policy)]
    pub policy: UpdatePolicy,

    /// Maximum entries per import (defaults to CARDPORT_BATCH_LIMIT or 1000)
    #[arg(long)]
    pub batch_limit: Option<usize>,

    /// Refuse to import anything if any line is rejected
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output format: csv, json or decklist
    #[arg(short, long, value_parser = parse_format)]
    pub format: Format,

    /// Holdings file to export
    #[arg(long)]
    pub holdings: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include card ids and timestamps
    #[arg(long)]
    pub include_metadata: bool,

    /// Include card conditions
    #[arg(long)]
    pub include_conditions: bool,

    /// Include card values
    #[arg(long)]
    pub include_values: bool,

    /// Leave out holdings with zero quantity
    #[arg(long)]
    pub only_owned: bool,

    /// Name written at the top of deck lists
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DiffArgs {
    /// Older snapshot file
    pub old: PathBuf,

    /// Newer snapshot file
    pub new: PathBuf,

    /// Leave unchanged cards out of the output
    #[arg(long)]
    pub changes_only: bool,
}

fn parse_format(s: &str) -> Result<Format, String> {
    s.parse::<Format>().map_err(|e| e.to_string())
}

fn parse_policy(s: &str) -> Result<UpdatePolicy, String> {
    s.parse::<UpdatePolicy>()
}
