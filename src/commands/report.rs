//! Rendering and delivery of analysis reports.

use std::path::Path;

use crate::cli::OutputFormat;
use crate::context::ServiceContext;
use crate::engine::AnalysisReport;

/// Serializes a report in the requested format, newline-terminated.
pub(crate) fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, String> {
    let mut text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("failed to serialize report as JSON: {e}"))?,
        OutputFormat::Yaml => serde_yaml::to_string(report)
            .map_err(|e| format!("failed to serialize report as YAML: {e}"))?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Prints the report to stdout, or writes it through the filesystem port
/// when `--output` is set.
pub(crate) fn emit(
    ctx: &ServiceContext,
    report: &AnalysisReport,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), String> {
    let text = render(report, format)?;
    match output {
        Some(path) => {
            ctx.fs
                .write(path, &text)
                .map_err(|e| format!("failed to write report to {}: {e}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
