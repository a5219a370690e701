use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use regex::Regex;

use crate::config::{
    FileSystem, IgnoreSpec, RealFileSystem, Settings, SettingsLoader, SettingsProvider,
    absolute_path,
};
use crate::error::{Result, SpaceGuardError};

use super::ignores::IgnorePatternCatalog;
use super::report::{FileReport, Report};
use super::text::{SourceFile, decode};
use super::{Checker, default_checks};

/// Validates files one at a time and accumulates their findings.
///
/// One instance is not meant to be shared between threads; parallel callers
/// use one validator per worker and merge the reports.
pub struct Validator<'c, F: FileSystem = RealFileSystem> {
    options: Settings,
    catalog: &'c IgnorePatternCatalog,
    fs: F,
    checks: Vec<Box<dyn Checker + Send + Sync>>,
    report: Report,
    processed: IndexSet<PathBuf>,
}

impl<'c> Validator<'c, RealFileSystem> {
    #[must_use]
    pub fn new(options: Settings, catalog: &'c IgnorePatternCatalog) -> Self {
        Self::with_fs(options, catalog, RealFileSystem)
    }
}

impl<'c, F: FileSystem> Validator<'c, F> {
    #[must_use]
    pub fn with_fs(options: Settings, catalog: &'c IgnorePatternCatalog, fs: F) -> Self {
        Self {
            options,
            catalog,
            fs,
            checks: default_checks(),
            report: Report::new(),
            processed: IndexSet::new(),
        }
    }

    /// Validate one file and add its findings to the report.
    ///
    /// # Errors
    /// Returns an error if the path is missing or not a regular file, if a
    /// configured settings file is missing, not a file or malformed, if the
    /// merged `newline_maximum` is not positive, or if the file cannot be read
    /// or decoded. No findings are recorded for the file in that case.
    pub fn validate(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !self.fs.exists(path) {
            return Err(SpaceGuardError::PathInvalid {
                path: path.to_path_buf(),
            });
        }
        if !self.fs.is_file(path) {
            return Err(SpaceGuardError::PathIsNotFile {
                path: path.to_path_buf(),
            });
        }

        let key = absolute_path(&self.fs, path);
        tracing::debug!("Validating {}", key.display());

        let settings = SettingsLoader::new(&self.fs).load(&self.options, path)?;
        settings.newline_maximum()?;

        let bytes = self
            .fs
            .read(path)
            .map_err(|source| SpaceGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let text = decode(&bytes, &settings.encoding, path)?;
        let patterns = resolve_ignores(self.catalog, &settings.ignores);
        let file = SourceFile::new(&text, &patterns);

        let mut findings = FileReport::new();
        for check in &self.checks {
            check.check(&file, &settings, &mut findings)?;
        }
        tracing::trace!(
            "{}: {} finding(s) on {} line(s)",
            key.display(),
            findings.violation_count(),
            findings.line_count()
        );

        self.report.record(key.clone(), findings);
        self.processed.insert(key);
        Ok(())
    }

    /// Findings for one file, empty if it never reported anything.
    #[must_use]
    pub fn invalid_lines(&self, path: impl AsRef<Path>) -> &FileReport {
        self.report.file(&absolute_path(&self.fs, path.as_ref()))
    }

    #[must_use]
    pub const fn invalid_files(&self) -> &Report {
        &self.report
    }

    /// Number of distinct files validated successfully.
    #[must_use]
    pub fn processed_files(&self) -> usize {
        self.processed.len()
    }

    pub fn reset(&mut self) {
        self.report.clear();
        self.processed.clear();
    }

    #[must_use]
    pub fn into_report(self) -> Report {
        self.report
    }
}

/// Resolve ignore entries to patterns, in configured order.
fn resolve_ignores<'a>(catalog: &'a IgnorePatternCatalog, ignores: &'a [IgnoreSpec]) -> Vec<&'a Regex> {
    ignores
        .iter()
        .filter_map(|spec| match spec {
            IgnoreSpec::Raw(regex) => Some(regex),
            IgnoreSpec::Named(id) => {
                let found = catalog.get(id);
                if found.is_none() {
                    tracing::warn!("Unknown ignore pattern \"{id}\", skipping");
                }
                found
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
