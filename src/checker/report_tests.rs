use std::path::{Path, PathBuf};

use super::*;
use crate::checker::message::MessageKind;

fn finding(kind: MessageKind, line: usize) -> ValidationError {
    ValidationError::from_kind(kind, line).unwrap()
}

#[test]
fn file_report_groups_by_line_in_ascending_order() {
    let mut report = FileReport::new();
    report.push(finding(MessageKind::Trailingspaces, 5));
    report.push(finding(MessageKind::Newline, 2));
    report.push(finding(MessageKind::IndentationTabs, 5));

    let lines: Vec<usize> = report.lines().map(|(line, _)| line).collect();
    assert_eq!(lines, vec![2, 5]);
    assert_eq!(report.get(5).len(), 2);
    assert_eq!(report.get(5)[0].code(), "TRAILINGSPACES");
    assert!(report.get(3).is_empty());
    assert_eq!(report.violation_count(), 3);
    assert_eq!(report.line_count(), 2);
}

#[test]
fn record_skips_empty_findings() {
    let mut report = Report::new();
    report.record(PathBuf::from("/a"), FileReport::new());

    assert!(report.is_empty());
    assert!(report.file(Path::new("/a")).is_empty());
}

#[test]
fn record_accumulates_per_path() {
    let mut first = FileReport::new();
    first.push(finding(MessageKind::Newline, 1));
    let mut second = FileReport::new();
    second.push(finding(MessageKind::EndOfLine, 1));

    let mut report = Report::new();
    report.record(PathBuf::from("/a"), first);
    report.record(PathBuf::from("/a"), second);

    let codes: Vec<&str> = report
        .file(Path::new("/a"))
        .get(1)
        .iter()
        .map(ValidationError::code)
        .collect();
    assert_eq!(codes, vec!["NEWLINE", "END_OF_LINE"]);
}

#[test]
fn merge_and_counts() {
    let mut left = Report::new();
    let mut findings = FileReport::new();
    findings.push(finding(MessageKind::IndentationGuess, 3));
    left.record(PathBuf::from("/b"), findings);

    let mut right = Report::new();
    let mut findings = FileReport::new();
    findings.push(finding(MessageKind::Trailingspaces, 1));
    findings.push(finding(MessageKind::Trailingspaces, 2));
    right.record(PathBuf::from("/a"), findings);

    left.merge(right);
    assert_eq!(left.file_count(), 2);
    assert_eq!(left.violation_count(), 3);
    assert_eq!(left.count_by_severity(Severity::Hint), 1);
    assert_eq!(left.count_by_severity(Severity::Warning), 2);

    left.sort_by_path();
    let paths: Vec<&Path> = left.files().map(|(path, _)| path).collect();
    assert_eq!(paths, vec![Path::new("/a"), Path::new("/b")]);

    left.clear();
    assert!(left.is_empty());
}

#[test]
fn serializes_as_nested_maps() {
    let mut findings = FileReport::new();
    findings.push(finding(MessageKind::Newline, 4));
    let mut report = Report::new();
    report.record(PathBuf::from("/a.txt"), findings);

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["/a.txt"]["4"][0]["code"], "NEWLINE");
}
