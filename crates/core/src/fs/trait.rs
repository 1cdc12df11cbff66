//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Abstraction over the few file operations command assembly needs
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Create a directory and any missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Create or truncate `path` and write `contents` in full.
    /// The file is closed before this returns.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
