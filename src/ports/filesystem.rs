//! Filesystem port for directory discovery and file output.

use std::io;
use std::path::Path;

/// Provides the filesystem operations the resolver and the fetch client need.
///
/// Errors are plain [`io::Error`]s so callers can tell an absent directory
/// (`ErrorKind::NotFound`) from a real failure.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if `path` is a directory (symlinks are followed).
    ///
    /// A path that does not exist is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected, for example when a
    /// parent directory denies traversal.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Returns `true` if `path` is a regular file (symlinks are followed).
    ///
    /// A path that does not exist is `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected.
    fn is_file(&self, path: &Path) -> io::Result<bool>;

    /// Lists the entry names directly under a directory.
    ///
    /// Names that are not valid UTF-8 are skipped. No ordering is guaranteed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Writes `contents` to a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}
