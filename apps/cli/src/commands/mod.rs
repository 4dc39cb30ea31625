//! Subcommand implementations.

pub mod diff;
pub mod export;
pub mod import;
pub mod preview;

pub use diff::DiffReport;
pub use import::ImportReport;
pub use preview::ValidationReport;
