//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;
pub mod llm;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use filesystem::RecordingFileSystem;
pub use llm::RecordingLlmClient;

/// Record a `Result<T, E>` interaction using the `{"ok": v}` / `{"err": "msg"}` convention.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or_else(|e| {
        tracing::warn!(port, method, error = %e, "failed to serialize recording input");
        serde_json::Value::Null
    });

    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "ok": inner }),
            Err(e) => serde_json::json!({ "err": format!("unserializable output: {e}") }),
        },
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => {
            tracing::warn!(port, method, error = %e, "recorder lock poisoned, interaction lost");
        }
    }
}
