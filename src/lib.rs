//! Core library entry for the `archlens` CLI.
//!
//! The analysis itself lives in [`engine`]; [`analyze`] runs it with the
//! default configuration against the real filesystem.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod ports;
pub mod summarize;

use clap::Parser;

pub use engine::{analyze, AnalysisReport, RepositoryModel};
pub use error::EngineError;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
