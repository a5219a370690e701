use std::path::PathBuf;

use super::*;
use crate::checker::{FileReport, MessageKind, ValidationError};

fn outcome_with(kinds: &[MessageKind]) -> CheckOutcome {
    let mut findings = FileReport::new();
    for (idx, kind) in kinds.iter().enumerate() {
        findings.push(ValidationError::from_kind(*kind, idx + 1).unwrap());
    }
    let mut report = Report::new();
    report.record(PathBuf::from("/p/a.js"), findings);
    CheckOutcome {
        report,
        failures: Vec::new(),
        files_checked: 1,
    }
}

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("sarif".parse::<OutputFormat>().is_err());
}

#[test]
fn hints_only_fail_in_strict_mode() {
    let outcome = outcome_with(&[MessageKind::IndentationGuess]);

    assert_eq!(outcome.hints(), 1);
    assert_eq!(outcome.warnings(), 0);
    assert!(!outcome.has_violations(false));
    assert!(outcome.has_violations(true));
}

#[test]
fn warnings_always_fail() {
    let outcome = outcome_with(&[MessageKind::Trailingspaces, MessageKind::Newline]);

    assert_eq!(outcome.warnings(), 2);
    assert!(outcome.has_violations(false));
}

#[test]
fn empty_outcome_is_clean() {
    assert!(!CheckOutcome::default().has_violations(true));
}
