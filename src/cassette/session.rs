//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Manages one `CassetteRecorder` per port for a recording session.
///
/// Each port writes `<port>.cassette.yaml` inside a timestamped directory.
pub struct RecordingSession {
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<base>/<timestamp>/`.
    ///
    /// `label` names the analyzed tree in every cassette; pass `"unknown"`
    /// when there is nothing better.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped directory already exists or
    /// cannot be created.
    pub fn new(base: &Path, label: &str) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, label)))
        };

        Ok(Self { fs: make_recorder("fs"), llm: make_recorder("llm"), output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.fs, "fs")?;
        finish_one(self.llm, "llm")?;
        Ok(self.output_dir)
    }
}
