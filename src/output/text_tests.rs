use std::path::PathBuf;

use serde_json::json;

use super::*;
use crate::checker::{MessageKind, Report};
use crate::error::SpaceGuardError;
use crate::output::FileFailure;

fn sample_outcome() -> CheckOutcome {
    let mut findings = FileReport::new();
    findings.push(ValidationError::from_kind(MessageKind::Trailingspaces, 3).unwrap());
    findings.push(
        ValidationError::from_kind(MessageKind::IndentationGuess, 7)
            .unwrap()
            .with_payload(json!({"indentation": 3, "expected": 2}))
            .unwrap(),
    );
    let mut report = Report::new();
    report.record(PathBuf::from("/p/a.js"), findings);

    CheckOutcome {
        report,
        failures: Vec::new(),
        files_checked: 2,
    }
}

#[test]
fn text_lists_findings_under_their_file() {
    let output = TextFormatter::new(ColorMode::Never)
        .format(&sample_outcome())
        .unwrap();

    assert!(output.starts_with("/p/a.js\n"));
    assert!(output.contains("    3  warning  Unexpected trailing spaces found.  TRAILINGSPACES"));
    assert!(output.contains("    7  hint  "));
    assert!(output.contains("Summary: 2 files checked, 1 with findings, 1 warnings, 1 hints"));
    assert!(!output.contains("expected="));
}

#[test]
fn text_payloads_on_request() {
    let output = TextFormatter::new(ColorMode::Never)
        .with_payloads(true)
        .format(&sample_outcome())
        .unwrap();

    assert!(output.contains("expected=2"));
    assert!(output.contains("indentation=3"));
}

#[test]
fn text_summary_counts_errors() {
    let mut outcome = sample_outcome();
    outcome.failures.push(FileFailure {
        path: PathBuf::from("/p/b.js"),
        error: SpaceGuardError::NewlineMaximumInvalid { value: 0 },
    });

    let output = TextFormatter::new(ColorMode::Never).format(&outcome).unwrap();
    assert!(output.contains(", 1 errors"));
}

#[test]
fn text_clean_run_prints_only_summary() {
    let outcome = CheckOutcome {
        files_checked: 4,
        ..CheckOutcome::default()
    };
    let output = TextFormatter::new(ColorMode::Never).format(&outcome).unwrap();

    assert_eq!(
        output,
        "Summary: 4 files checked, 0 with findings, 0 warnings, 0 hints\n"
    );
}

#[test]
fn text_colors_when_forced() {
    let output = TextFormatter::new(ColorMode::Always)
        .format(&sample_outcome())
        .unwrap();

    assert!(output.contains(ansi::YELLOW));
    assert!(output.contains(ansi::CYAN));
    assert!(output.contains(ansi::RESET));
}
