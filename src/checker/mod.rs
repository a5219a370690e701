mod ignores;
mod line;
mod message;
mod report;
mod text;
mod validator;
mod violation;
mod whole_file;

pub use ignores::{IgnorePatternCatalog, IgnoredRegions};
pub use line::{IndentationCheck, TrailingSpacesCheck};
pub use message::{MessageKind, Severity};
pub use report::{FileReport, Report};
pub use text::{SourceFile, decode, split_lines};
pub use validator::Validator;
pub use violation::{Payload, ValidationError};
pub use whole_file::{EndOfLineCheck, FinalNewlineCheck, NewlineMaximumCheck};

use crate::config::Settings;
use crate::error::Result;

pub trait Checker {
    /// Report the findings for `file` under `settings`.
    ///
    /// A check that `settings` leaves disabled reports nothing.
    ///
    /// # Errors
    /// Returns an error only for invalid settings or malformed findings,
    /// never for style violations.
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()>;
}

/// Every check in report order: whole-file checks, then line checks.
#[must_use]
pub fn default_checks() -> Vec<Box<dyn Checker + Send + Sync>> {
    vec![
        Box::new(NewlineMaximumCheck::new()),
        Box::new(FinalNewlineCheck),
        Box::new(EndOfLineCheck),
        Box::new(IndentationCheck::new()),
        Box::new(TrailingSpacesCheck::new()),
    ]
}
