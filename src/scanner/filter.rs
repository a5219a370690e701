use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, SpaceGuardError};

/// Version-control metadata directories; never walked.
const VCS_DIRS: [&str; 4] = [".git", ".hg", ".svn", "CVS"];

#[must_use]
pub fn is_vcs_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| VCS_DIRS.contains(&name))
}

/// Decides which walked entries are validated. Paths are relative to the
/// scan root.
pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;

    fn should_descend(&self, dir: &Path) -> bool {
        !is_vcs_dir(dir)
    }
}

/// Keeps files by extension and drops anything matching an exclude glob.
///
/// A directory matching an exclude glob is not entered at all.
pub struct GlobFilter {
    extensions: Vec<String>,
    excludes: GlobSet,
}

impl GlobFilter {
    /// Extensions may be written with or without the leading dot.
    ///
    /// # Errors
    /// Returns `InvalidGlob` if an exclude pattern does not parse.
    pub fn new(extensions: Vec<String>, exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|source| SpaceGuardError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let excludes = builder.build().map_err(|source| SpaceGuardError::InvalidGlob {
            pattern: exclude_patterns.join(", "),
            source,
        })?;

        let extensions = extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();

        Ok(Self {
            extensions,
            excludes,
        })
    }

    /// Extension match, case-insensitive. No extensions configured means
    /// every file matches.
    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.matches_extension(path) && !self.excludes.is_match(path)
    }

    fn should_descend(&self, dir: &Path) -> bool {
        !is_vcs_dir(dir) && !self.excludes.is_match(dir)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
