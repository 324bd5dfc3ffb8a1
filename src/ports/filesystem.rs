//! Filesystem port for file content I/O.

use std::path::Path;

/// Provides access to file contents.
///
/// Directory enumeration is not part of this port: the walker reads the
/// real tree. Content reads go through here so they can be recorded and
/// replayed.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is
    /// not valid UTF-8 (binary files).
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
