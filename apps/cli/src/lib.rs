pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod store;

use cardport_core::TransferConfig;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::from_env()?;
    tracing::debug!(?config, "loaded limits");

    execute(cli.command, &config).await
}

/// Run one subcommand, printing its result to stdout.
pub async fn execute(command: Command, config: &TransferConfig) -> anyhow::Result<()> {
    match command {
        Command::Preview(args) => print_json(&commands::preview::preview(&args, config)?),
        Command::Validate(args) => {
            let report = commands::preview::validate(&args)?;
            print_json(&report)?;
            if !report.is_valid() {
                anyhow::bail!("{} line(s) rejected", report.errors.len());
            }
            Ok(())
        }
        Command::Import(args) => print_json(&commands::import::import(&args, config).await?),
        Command::Export(args) => {
            let text = commands::export::render(&args)?;
            match &args.output {
                Some(path) => {
                    store::write_text(path, &text)?;
                    tracing::info!(path = %path.display(), "wrote export");
                }
                None => print!("{}", text),
            }
            Ok(())
        }
        Command::Diff(args) => print_json(&commands::diff::diff_files(&args)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
