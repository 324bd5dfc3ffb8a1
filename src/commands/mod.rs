//! Command dispatch and handlers.

pub mod analyze;
pub mod excerpt;
mod report;
pub mod summarize;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Command, SummarizeArgs};
use crate::config::AnalyzerConfig;
use crate::context::ServiceContext;
use crate::engine::CancelToken;

/// Environment variable naming a directory to record port traffic into.
pub const RECORD_ENV_VAR: &str = "ARCHLENS_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `ARCHLENS_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files in that directory.
///
/// # Errors
///
/// Returns an error string if config loading or the selected command fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = resolve_config(command)?;

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);

    let (ctx, session) = if let Ok(path) = env::var(RECORD_ENV_VAR) {
        let label = recording_label(command.root());
        let (ctx, session) =
            ServiceContext::recording_at(PathBuf::from(path), &label, &config.llm)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config.llm), None)
    };

    let result = dispatch_with_context(command, &ctx, &config, &cancel);

    // Recording is flushed even when the command failed.
    match session {
        Some(session) => {
            // Adapters hold the recorders; release them first.
            drop(ctx);
            finish_recording(session, result)
        }
        None => result,
    }
}

/// Loads the config for `command`, then applies `--model` over the file
/// and environment settings.
fn resolve_config(command: &Command) -> Result<AnalyzerConfig, String> {
    let mut config =
        AnalyzerConfig::load(command.root(), command.config_file()).map_err(|e| e.to_string())?;
    if let Command::Summarize(SummarizeArgs { model: Some(model), .. }) = command {
        config.llm.model.clone_from(model);
    }
    Ok(config)
}

/// Cassette label for a recorded analysis: the root directory's name.
fn recording_label(root: &Path) -> String {
    root.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map_or_else(|| "unknown".to_string(), |name| name.to_string_lossy().into_owned())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
) -> Result<(), String> {
    match command {
        Command::Analyze(args) => analyze::run(ctx, config, cancel, args),
        Command::Summarize(args) => summarize::run(ctx, config, cancel, args),
        Command::Excerpt(args) => excerpt::run(ctx, config, cancel, args),
    }
}

/// Route Ctrl-C to `cancel` so the walk stops between files.
fn install_interrupt_handler(cancel: &CancelToken) {
    let cancel = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        // Only one handler per process; a second dispatch keeps the first.
        tracing::debug!(error = %e, "interrupt handler not installed");
    }
}

/// Finish a recording session and print the output directory.
///
/// A cassette write failure is logged; the command's own `result` is
/// returned either way.
fn finish_recording(session: RecordingSession, result: Result<(), String>) -> Result<(), String> {
    match session.finish() {
        Ok(output_dir) => eprintln!("Recording saved to: {}", output_dir.display()),
        Err(e) => tracing::warn!(error = %e, "failed to write cassettes"),
    }
    result
}
