//! Checks that look at the file text as a whole.

use regex::Regex;
use serde_json::json;

use crate::config::{EndOfLine, Settings};
use crate::error::Result;

use super::Checker;
use super::message::MessageKind;
use super::report::FileReport;
use super::text::SourceFile;
use super::violation::ValidationError;

/// Caps the number of consecutive blank lines.
///
/// A run of line breaks at the very start of the file counts every break; a
/// run anywhere else counts one less, since the first break ends a content
/// line. Ignored lines inside the run reduce the count.
#[derive(Debug)]
pub struct NewlineMaximumCheck {
    line_break_run: Regex,
}

impl Default for NewlineMaximumCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl NewlineMaximumCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            line_break_run: Regex::new(r"(?:\r?\n)+").expect("Invalid regex"),
        }
    }
}

impl Checker for NewlineMaximumCheck {
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()> {
        let Some(maximum) = settings.newline_maximum()? else {
            return Ok(());
        };
        let text = file.text();

        for run in self.line_break_run.find_iter(text) {
            let breaks = run.as_str().matches('\n').count();
            let (at_line, amount) = if run.start() == 0 {
                if breaks <= maximum {
                    continue;
                }
                (0, breaks)
            } else {
                if breaks <= maximum + 1 {
                    continue;
                }
                (text[..run.start()].matches('\n').count() + 1, breaks - 1)
            };

            let ignored = (at_line + 1..=at_line + amount + 1)
                .filter(|&line| file.is_line_ignored(line))
                .count();
            let amount = if ignored > 0 {
                amount.saturating_sub(ignored + 1)
            } else {
                amount
            };

            if amount > maximum {
                findings.push(
                    ValidationError::from_kind(MessageKind::NewlineMaximum, at_line + 1)?
                        .with_message(MessageKind::NewlineMaximum.render(amount, maximum))
                        .with_payload(json!({ "amount": amount, "maximum": maximum }))?,
                );
            }
        }
        Ok(())
    }
}

/// Requires exactly one line break at the end of the file.
#[derive(Debug, Default)]
pub struct FinalNewlineCheck;

impl Checker for FinalNewlineCheck {
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()> {
        if !settings.newline {
            return Ok(());
        }
        let lines = file.lines();
        let Some(last) = lines.len().checked_sub(1) else {
            return Ok(());
        };

        if !lines[last].is_empty() {
            findings.push(ValidationError::from_kind(MessageKind::Newline, last + 1)?);
        } else if last >= 2 && lines[last - 1].is_empty() {
            findings.push(ValidationError::from_kind(MessageKind::NewlineAmount, last + 1)?);
        }
        Ok(())
    }
}

/// Reports every line terminator that differs from the configured one.
///
/// `\r\n` is one terminator, a lone `\r` or `\n` another. Terminators inside
/// an ignored region are skipped.
#[derive(Debug, Default)]
pub struct EndOfLineCheck;

impl Checker for EndOfLineCheck {
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()> {
        let Some(expected) = settings.end_of_line else {
            return Ok(());
        };
        let bytes = file.text().as_bytes();
        let mut line = 1;
        let mut offset = 0;

        while offset < bytes.len() {
            let (found, width) = match bytes[offset] {
                b'\r' if bytes.get(offset + 1) == Some(&b'\n') => (EndOfLine::Crlf, 2),
                b'\r' => (EndOfLine::Cr, 1),
                b'\n' => (EndOfLine::Lf, 1),
                _ => {
                    offset += 1;
                    continue;
                }
            };

            if found != expected && !file.ignored().contains_offset(offset) {
                findings.push(
                    ValidationError::from_kind(MessageKind::EndOfLine, line)?.with_payload(
                        json!({ "expected": expected.as_str(), "end_of_line": found.as_str() }),
                    )?,
                );
            }
            line += 1;
            offset += width;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "whole_file_tests.rs"]
mod tests;
