//! Filesystem abstraction for testability.
//!
//! Provides a trait for filesystem operations that can be mocked in tests.

use std::path::{Path, PathBuf};

use super::model::APP_NAME;

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read raw file contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists as any kind of entry, dangling symlinks
    /// included.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Get the platform-specific configuration directory for space-guard.
    ///
    /// - Windows: `%APPDATA%\spaceguard`
    /// - macOS: `~/Library/Application Support/spaceguard`
    /// - Linux: `~/.config/spaceguard` (XDG)
    fn config_dir(&self) -> Option<PathBuf>;

    /// Canonicalize a path to its absolute, normalized form.
    ///
    /// # Errors
    /// Returns an error if the path cannot be canonicalized (e.g., file doesn't exist).
    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
    }

    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        dunce::canonicalize(path)
    }
}

/// Join a relative path onto the filesystem's current directory.
///
/// Does not resolve symlinks or `..`; used to key reports by absolute path.
pub fn absolute_path<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    fs.current_dir()
        .map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}

#[cfg(test)]
#[path = "filesystem_tests.rs"]
mod tests;
