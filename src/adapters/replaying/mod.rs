//! Replaying adapters that serve recorded interactions.

pub mod filesystem;
pub mod llm;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;

pub use filesystem::ReplayingFileSystem;
pub use llm::ReplayingLlmClient;

/// Pull the next recorded output for `port::method`.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette is exhausted.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Decode a recorded `Result` using the `{"ok": v}` / `{"err": "msg"}` convention.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
