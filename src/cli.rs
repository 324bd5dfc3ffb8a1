//! CLI argument definitions.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `archlens`.
#[derive(Debug, Parser)]
#[command(name = "archlens", version, about = "Infer the architecture of a source tree")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify files and print the architecture report.
    Analyze(AnalyzeArgs),
    /// Analyze, then add an AI-written explanation of the repository.
    Summarize(SummarizeArgs),
    /// Print the code excerpt that `summarize` would send.
    Excerpt(ExcerptArgs),
}

impl Command {
    /// Root directory the command analyzes.
    #[must_use]
    pub fn root(&self) -> &Path {
        match self {
            Self::Analyze(args) => &args.path,
            Self::Summarize(args) => &args.path,
            Self::Excerpt(args) => &args.path,
        }
    }

    /// Explicit config file, if one was given.
    #[must_use]
    pub fn config_file(&self) -> Option<&Path> {
        match self {
            Self::Analyze(args) => args.config.as_deref(),
            Self::Summarize(args) => args.config.as_deref(),
            Self::Excerpt(args) => args.config.as_deref(),
        }
    }
}

/// Arguments for `archlens analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Root directory of the repository.
    pub path: PathBuf,
    /// Config file; defaults to `<PATH>/.archlens.yaml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Serialization format of the report.
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `archlens summarize`.
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Root directory of the repository.
    pub path: PathBuf,
    /// Config file; defaults to `<PATH>/.archlens.yaml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Serialization format of the report.
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Model identifier, overriding config and `ARCHLENS_MODEL`.
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for `archlens excerpt`.
#[derive(Debug, Args)]
pub struct ExcerptArgs {
    /// Root directory of the repository.
    pub path: PathBuf,
    /// Config file; defaults to `<PATH>/.archlens.yaml` when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Report serialization formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, OutputFormat};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn parses_analyze_with_defaults() {
        let cli = Cli::parse_from(["archlens", "analyze", "repo"]);
        let Command::Analyze(args) = &cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.output.is_none());
        assert_eq!(cli.command.root(), Path::new("repo"));
        assert!(cli.command.config_file().is_none());
    }

    #[test]
    fn parses_summarize_options() {
        let cli = Cli::parse_from([
            "archlens",
            "summarize",
            "repo",
            "--format",
            "yaml",
            "--output",
            "report.yaml",
            "--model",
            "llama-3.1-8b-instant",
        ]);
        let Command::Summarize(args) = &cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.format, OutputFormat::Yaml);
        assert_eq!(args.output.as_deref(), Some(Path::new("report.yaml")));
        assert_eq!(args.model.as_deref(), Some("llama-3.1-8b-instant"));
    }

    #[test]
    fn parses_excerpt_with_config() {
        let cli = Cli::parse_from(["archlens", "excerpt", "repo", "--config", "custom.yaml"]);
        assert!(matches!(cli.command, Command::Excerpt(_)));
        assert_eq!(cli.command.config_file(), Some(Path::new("custom.yaml")));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["archlens", "analyze", "repo", "--format", "xml"]).is_err());
    }

    #[test]
    fn path_is_required() {
        assert!(Cli::try_parse_from(["archlens", "analyze"]).is_err());
    }
}
