use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use super::message::Severity;
use super::violation::ValidationError;

/// Findings for one file, grouped by 1-indexed line in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FileReport {
    lines: BTreeMap<usize, Vec<ValidationError>>,
}

static EMPTY_FILE_REPORT: FileReport = FileReport::new();

impl FileReport {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.lines.entry(error.line()).or_default().push(error);
    }

    #[must_use]
    pub fn get(&self, line: usize) -> &[ValidationError] {
        self.lines.get(&line).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn lines(&self) -> impl Iterator<Item = (usize, &[ValidationError])> {
        self.lines.iter().map(|(line, errors)| (*line, errors.as_slice()))
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.lines.values().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines with at least one finding.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Append `other`'s findings after this report's findings on each line.
    pub fn append(&mut self, other: Self) {
        for (line, errors) in other.lines {
            self.lines.entry(line).or_default().extend(errors);
        }
    }
}

/// Accumulated findings for every validated file, in first-report order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    files: IndexMap<PathBuf, FileReport>,
}

impl Report {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit one file's findings. Empty reports leave no entry.
    pub fn record(&mut self, path: PathBuf, findings: FileReport) {
        if findings.is_empty() {
            return;
        }
        self.files.entry(path).or_default().append(findings);
    }

    /// Findings for `path`, empty when the file is clean or unknown.
    #[must_use]
    pub fn file(&self, path: &Path) -> &FileReport {
        self.files.get(path).unwrap_or(&EMPTY_FILE_REPORT)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &FileReport)> {
        self.files.iter().map(|(path, report)| (path.as_path(), report))
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.files.values().map(FileReport::violation_count).sum()
    }

    #[must_use]
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.files
            .values()
            .flat_map(FileReport::errors)
            .filter(|error| error.severity() == severity)
            .count()
    }

    /// Fold another report into this one, keeping this report's file order first.
    pub fn merge(&mut self, other: Self) {
        for (path, findings) in other.files {
            self.record(path, findings);
        }
    }

    pub fn sort_by_path(&mut self) {
        self.files.sort_keys();
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
