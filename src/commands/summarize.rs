//! `archlens summarize` command.

use crate::cli::SummarizeArgs;
use crate::config::AnalyzerConfig;
use crate::context::ServiceContext;
use crate::engine::excerpt::build_excerpt;
use crate::engine::{AnalysisReport, Analyzer, CancelToken};
use crate::summarize::summarize;

use super::report;

/// Execute the `summarize` command.
///
/// Produces the same report as `analyze` plus an `aiAnalysis` field
/// holding the model's explanation of the excerpt.
///
/// # Errors
///
/// Returns an error string if analysis, the completion call, or writing
/// the report fails.
pub fn run(
    ctx: &ServiceContext,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
    args: &SummarizeArgs,
) -> Result<(), String> {
    let report = build_report(ctx, config, cancel, args)?;
    report::emit(ctx, &report, args.format, args.output.as_deref())
}

/// Analyzes `args.path` and attaches the model's summary of its excerpt.
///
/// # Errors
///
/// Returns an error string if analysis or the completion call fails.
pub fn build_report(
    ctx: &ServiceContext,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
    args: &SummarizeArgs,
) -> Result<AnalysisReport, String> {
    let scan = Analyzer::new(config, ctx.fs.as_ref())
        .with_cancel(cancel.clone())
        .scan(&args.path)
        .map_err(|e| e.to_string())?;
    let excerpt = build_excerpt(&args.path, &scan.files, ctx.fs.as_ref(), &config.excerpt);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?;
    let ai_analysis = runtime.block_on(summarize(ctx, &excerpt, &config.llm))?;

    let mut report = AnalysisReport::from_model(&scan.model);
    report.ai_analysis = Some(ai_analysis);
    Ok(report)
}
