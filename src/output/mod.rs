mod error_output;
mod json;
mod text;

pub use error_output::ErrorOutput;
pub use json::JsonFormatter;
pub use text::{ColorMode, TextFormatter};

use std::path::PathBuf;

use crate::checker::{Report, Severity};
use crate::error::{Result, SpaceGuardError};

/// ANSI color codes
pub(crate) mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

/// A file that could not be validated.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: SpaceGuardError,
}

/// Everything one `check` run produced.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub report: Report,
    pub failures: Vec<FileFailure>,
    pub files_checked: usize,
}

impl CheckOutcome {
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.report.count_by_severity(Severity::Warning)
    }

    #[must_use]
    pub fn hints(&self) -> usize {
        self.report.count_by_severity(Severity::Hint)
    }

    /// Whether the run should fail. Hints only count when `strict`.
    #[must_use]
    pub fn has_violations(&self, strict: bool) -> bool {
        self.warnings() > 0 || (strict && self.hints() > 0)
    }
}

/// Trait for formatting check outcomes into various output formats.
pub trait OutputFormatter {
    /// Format the outcome into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, outcome: &CheckOutcome) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
