//! Error types for repository analysis.

use std::io;
use std::path::PathBuf;

/// Errors that abort an analysis run.
///
/// Per-file content read failures are not represented here: an unreadable
/// file keeps its filename-based tags and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The root (or a directory below it) does not exist.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The root (or a directory below it) cannot be read.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The root exists but is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A directory links back to one of its ancestors.
    #[error("cyclic directory structure at {}", .0.display())]
    CyclicStructure(PathBuf),

    /// The caller cancelled the run before traversal finished.
    #[error("analysis cancelled")]
    Cancelled,

    /// Any other I/O failure while enumerating the tree.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being visited when the failure occurred.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// Returns `true` for failures caused by a missing or unreadable root.
    #[must_use]
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::PermissionDenied(_) | Self::NotADirectory(_))
    }

    /// Maps an I/O error at `path` onto the matching variant.
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }
}

/// Errors raised while loading an [`AnalyzerConfig`](crate::config::AnalyzerConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file is not valid YAML for the expected shape.
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}
