mod filter;

pub use filter::{FileFilter, GlobFilter, is_vcs_dir};

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;

/// Turns command-line paths into the files to validate.
pub trait FileScanner {
    /// All files below `root` that pass the filter, sorted.
    ///
    /// # Errors
    /// Returns an error if the walk cannot start.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Expand `paths` in order, dropping repeats. Directories are scanned;
    /// anything else is kept as given, so explicit files skip the filter and
    /// missing paths still reach the validator.
    ///
    /// # Errors
    /// Returns an error if scanning a directory fails.
    fn collect(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = IndexSet::new();
        for path in paths {
            if path.is_dir() {
                files.extend(self.scan(path)?);
            } else {
                files.insert(path.clone());
            }
        }
        Ok(files.into_iter().collect())
    }
}

/// Walks directories without following symlinks, pruning directories the
/// filter rejects.
pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    fn enters(&self, root: &Path, entry: &DirEntry) -> bool {
        entry.depth() == 0
            || !entry.file_type().is_dir()
            || self.filter.should_descend(relative_to(root, entry.path()))
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = WalkDir::new(root)
            .into_iter()
            .filter_entry(|entry| self.enters(root, entry))
            .filter_map(|entry| {
                entry
                    .inspect_err(|e| tracing::warn!("Skipping unreadable entry: {e}"))
                    .ok()
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.filter.should_include(relative_to(root, entry.path())))
            .map(DirEntry::into_path)
            .collect();
        files.sort();
        tracing::debug!("Found {} file(s) under {}", files.len(), root.display());
        Ok(files)
    }
}

/// `path` below `root`; a root that is itself a file is returned whole.
fn relative_to<'p>(root: &Path, path: &'p Path) -> &'p Path {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => path,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
