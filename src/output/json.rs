use serde::Serialize;

use crate::checker::ValidationError;
use crate::error::Result;

use super::{CheckOutcome, FileFailure, OutputFormatter};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    files: Vec<FileResult<'a>>,
    errors: Vec<ErrorResult>,
}

#[derive(Serialize)]
struct Summary {
    files_checked: usize,
    files_with_findings: usize,
    warnings: usize,
    hints: usize,
    errors: usize,
}

#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    findings: Vec<&'a ValidationError>,
}

#[derive(Serialize)]
struct ErrorResult {
    path: String,
    #[serde(rename = "type")]
    error_type: &'static str,
    message: String,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &CheckOutcome) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                files_checked: outcome.files_checked,
                files_with_findings: outcome.report.file_count(),
                warnings: outcome.warnings(),
                hints: outcome.hints(),
                errors: outcome.failures.len(),
            },
            files: outcome
                .report
                .files()
                .map(|(path, findings)| FileResult {
                    path: path.display().to_string(),
                    findings: findings.errors().collect(),
                })
                .collect(),
            errors: outcome.failures.iter().map(convert_failure).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_failure(failure: &FileFailure) -> ErrorResult {
    ErrorResult {
        path: failure.path.display().to_string(),
        error_type: failure.error.error_type(),
        message: failure.error.to_string(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
