//! `archlens excerpt` command.

use crate::cli::ExcerptArgs;
use crate::config::AnalyzerConfig;
use crate::context::ServiceContext;
use crate::engine::excerpt::build_excerpt;
use crate::engine::{Analyzer, CancelToken};

/// Execute the `excerpt` command: print what `summarize` would send.
///
/// # Errors
///
/// Returns an error string if the tree cannot be walked.
pub fn run(
    ctx: &ServiceContext,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
    args: &ExcerptArgs,
) -> Result<(), String> {
    let scan = Analyzer::new(config, ctx.fs.as_ref())
        .with_cancel(cancel.clone())
        .scan(&args.path)
        .map_err(|e| e.to_string())?;
    let excerpt = build_excerpt(&args.path, &scan.files, ctx.fs.as_ref(), &config.excerpt);
    if excerpt.is_empty() {
        eprintln!("No readable files under {}", args.path.display());
    } else {
        print!("{excerpt}");
    }
    Ok(())
}
