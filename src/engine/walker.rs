//! Depth-first enumeration of regular files under a root.

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use super::FileDescriptor;
use crate::config::AnalyzerConfig;
use crate::error::EngineError;

/// Shared cancellation flag checked between file visits.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Fails with [`EngineError::Cancelled`] if cancellation was requested.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cancelled`] after [`CancelToken::cancel`].
    pub fn check(&self) -> Result<(), EngineError> {
        if self.is_cancelled() {
            Err(EngineError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Lists every regular file under `root`, pre-order, siblings sorted by name.
///
/// Directories named in `config.excluded_dirs` are pruned together with
/// their contents. Symlinks are followed; a link back to an ancestor fails
/// the walk with [`EngineError::CyclicStructure`]. Dangling links are
/// skipped.
///
/// # Errors
///
/// Returns an error if `root` is missing, unreadable, or not a directory,
/// if a directory below it cannot be read, if a cycle is found, or if
/// `cancel` fires.
pub fn walk(
    root: &Path,
    config: &AnalyzerConfig,
    cancel: &CancelToken,
) -> Result<Vec<FileDescriptor>, EngineError> {
    let metadata =
        std::fs::metadata(root).map_err(|e| EngineError::from_io(root.to_path_buf(), e))?;
    if !metadata.is_dir() {
        return Err(EngineError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_pruned(entry, config));

    let mut files = Vec::new();
    for entry in walker {
        cancel.check()?;
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_dangling_link(&err) => {
                tracing::debug!(path = ?err.path(), "skipping dangling symlink");
                continue;
            }
            Err(err) => return Err(walk_error(root, err)),
        };
        if entry.file_type().is_file() {
            files.push(describe(root, entry.path()));
        }
    }
    Ok(files)
}

/// Returns `true` for directories whose name is on the denylist.
fn is_pruned(entry: &DirEntry, config: &AnalyzerConfig) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let pruned = entry.file_name().to_str().is_some_and(|name| config.is_excluded_dir(name));
    if pruned {
        tracing::debug!(path = %entry.path().display(), "pruning excluded directory");
    }
    pruned
}

fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err.io_error().is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
        && err.path().is_some_and(is_symlink)
}

/// A link that resolves back to itself through other links (`a -> b -> a`).
/// walkdir reports these as plain I/O errors rather than ancestor loops.
fn is_symlink_loop(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err.io_error().is_some_and(|e| e.kind() != io::ErrorKind::NotFound)
        && err.path().is_some_and(is_symlink)
}

fn is_symlink(path: &Path) -> bool {
    path.symlink_metadata().is_ok_and(|m| m.file_type().is_symlink())
}

fn walk_error(root: &Path, err: walkdir::Error) -> EngineError {
    let path = err.path().unwrap_or(root).to_path_buf();
    if err.loop_ancestor().is_some() || is_symlink_loop(&err) {
        return EngineError::CyclicStructure(path);
    }
    match err.into_io_error() {
        Some(source) => EngineError::from_io(path, source),
        None => EngineError::Io { path, source: io::Error::other("directory walk failed") },
    }
}

/// Builds a root-relative, `/`-separated descriptor for `path`.
fn describe(root: &Path, path: &Path) -> FileDescriptor {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let rel = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let name = path.file_name().map_or_else(|| rel.clone(), |n| n.to_string_lossy().into_owned());
    FileDescriptor { path: rel, name }
}
