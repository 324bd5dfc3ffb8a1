//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::LiveLlmClient;
use crate::adapters::recording::{RecordingFileSystem, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingLlmClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::LlmConfig;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::{CompletionRequest, LlmClient, LlmFuture};

/// Bundles all port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// replaying, recording).
pub struct ServiceContext {
    /// Filesystem for file content I/O.
    pub fs: Box<dyn FileSystem>,
    /// LLM client for repository summaries.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context talking to the real filesystem and the
    /// configured chat completions endpoint.
    #[must_use]
    pub fn live(llm: &LlmConfig) -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            llm: Box::new(LiveLlmClient::new(llm.endpoint.clone())),
        }
    }

    /// Creates a recording context backed by live adapters.
    ///
    /// Interactions are captured into a [`RecordingSession`] under
    /// `<base>/<timestamp>/`, each cassette labelled with `label`. Drop the
    /// context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        base: PathBuf,
        label: &str,
        llm: &LlmConfig,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(&base, label)?;
        let live = Self::live(llm);
        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            llm: Box::new(RecordingLlmClient::new(live.llm, session.llm.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Each port gets its own replayer so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = CassetteConfig::load_cassette(path)?;
        Ok(Self {
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use an adapter that panics with
    /// a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            llm: match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
        })
    }
}

// Stand-ins for ports left out of a CassetteConfig.

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig: no cassette loaded for fs");
    }
}

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> LlmFuture<'_> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}
