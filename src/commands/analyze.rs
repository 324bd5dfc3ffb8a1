//! `archlens analyze` command.

use crate::cli::AnalyzeArgs;
use crate::config::AnalyzerConfig;
use crate::context::ServiceContext;
use crate::engine::{AnalysisReport, Analyzer, CancelToken};

use super::report;

/// Execute the `analyze` command.
///
/// Walks `args.path`, classifies every file, and emits the report.
///
/// # Errors
///
/// Returns an error string if the tree cannot be analyzed or the report
/// cannot be written.
pub fn run(
    ctx: &ServiceContext,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
    args: &AnalyzeArgs,
) -> Result<(), String> {
    let model = Analyzer::new(config, ctx.fs.as_ref())
        .with_cancel(cancel.clone())
        .analyze(&args.path)
        .map_err(|e| e.to_string())?;
    report::emit(ctx, &AnalysisReport::from_model(&model), args.format, args.output.as_deref())
}
