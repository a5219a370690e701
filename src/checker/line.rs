//! Checks that run once per line.

use regex::Regex;
use serde_json::json;

use crate::config::{Indentation, Settings};
use crate::error::Result;

use super::Checker;
use super::message::MessageKind;
use super::report::FileReport;
use super::text::SourceFile;
use super::violation::ValidationError;

const BOM: char = '\u{FEFF}';

/// Indentation style, spacing multiple and depth-jump heuristic.
///
/// Ignored lines are skipped. A line that fails the style check gets no
/// further indentation findings.
#[derive(Debug)]
pub struct IndentationCheck {
    tabs: Regex,
    tabs_bom: Regex,
    spaces: Regex,
    spaces_bom: Regex,
}

impl Default for IndentationCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentationCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tabs: Regex::new(r"^\t*(?:[^\s\x{FEFF}]|$)").expect("Invalid regex"),
            tabs_bom: Regex::new(r"^\x{FEFF}?\t*(?:[^\s\x{FEFF}]|$)").expect("Invalid regex"),
            spaces: Regex::new(r"^ *(?:[^\s\x{FEFF}]|$)").expect("Invalid regex"),
            spaces_bom: Regex::new(r"^\x{FEFF}? *(?:[^\s\x{FEFF}]|$)").expect("Invalid regex"),
        }
    }

    const fn style_pattern(&self, mode: Indentation, allows_bom: bool) -> &Regex {
        match (mode, allows_bom) {
            (Indentation::Tabs, false) => &self.tabs,
            (Indentation::Tabs, true) => &self.tabs_bom,
            (Indentation::Spaces, false) => &self.spaces,
            (Indentation::Spaces, true) => &self.spaces_bom,
        }
    }

    fn check_spaces_amount(
        line: &str,
        number: usize,
        settings: &Settings,
        findings: &mut FileReport,
    ) -> Result<()> {
        let Some(spaces) = settings.spaces() else {
            return Ok(());
        };
        let indent = leading_run(line, ' ', settings.allows_bom);
        if indent % spaces == 0 {
            return Ok(());
        }

        let expected = nearest_multiple(indent, spaces);
        findings.push(
            ValidationError::from_kind(MessageKind::IndentationSpacesAmount, number)?
                .with_message(MessageKind::IndentationSpacesAmount.render(expected, indent))
                .with_payload(json!({ "expected": expected, "indent": indent }))?,
        );
        Ok(())
    }

    fn guess(
        line: &str,
        previous: Option<&str>,
        number: usize,
        settings: &Settings,
        findings: &mut FileReport,
    ) -> Result<()> {
        let (Some(current), Some(before)) = (
            depth(line, settings),
            previous.map_or(Some(0), |prev| depth(prev, settings)),
        ) else {
            return Ok(());
        };

        if current <= before + 1 {
            return Ok(());
        }
        let expected = before + 1;
        findings.push(
            ValidationError::from_kind(MessageKind::IndentationGuess, number)?
                .with_message(MessageKind::IndentationGuess.render(expected, current))
                .with_payload(json!({ "indentation": current, "expected": expected }))?,
        );
        Ok(())
    }
}

impl Checker for IndentationCheck {
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()> {
        let Some(mode) = settings.indentation else {
            return Ok(());
        };
        let style = self.style_pattern(mode, settings.allows_bom);
        let mut previous: Option<&str> = None;

        for (idx, line) in file.lines().iter().copied().enumerate() {
            let number = idx + 1;
            if file.is_line_ignored(number) {
                continue;
            }

            if style.is_match(line) {
                if mode == Indentation::Spaces {
                    Self::check_spaces_amount(line, number, settings, findings)?;
                }
                if settings.indentation_guess {
                    Self::guess(line, previous, number, settings, findings)?;
                }
            } else {
                let kind = match mode {
                    Indentation::Tabs => MessageKind::IndentationTabs,
                    Indentation::Spaces => MessageKind::IndentationSpaces,
                };
                findings.push(ValidationError::from_kind(kind, number)?);
            }

            if !line.trim().is_empty() {
                previous = Some(line);
            }
        }
        Ok(())
    }
}

/// Length of the leading run of `ch`, after an optional BOM when allowed.
fn leading_run(line: &str, ch: char, allows_bom: bool) -> usize {
    let line = if allows_bom {
        line.strip_prefix(BOM).unwrap_or(line)
    } else {
        line
    };
    line.chars().take_while(|&c| c == ch).count()
}

/// Indentation depth in levels, or `None` when it is not a whole number.
fn depth(line: &str, settings: &Settings) -> Option<usize> {
    match settings.indentation? {
        Indentation::Tabs => Some(leading_run(line, '\t', settings.allows_bom)),
        Indentation::Spaces => {
            let spaces = settings.spaces()?;
            let count = leading_run(line, ' ', settings.allows_bom);
            (count % spaces == 0).then_some(count / spaces)
        }
    }
}

/// `round(indent / spaces) * spaces`, with ties going to the even multiple.
const fn nearest_multiple(indent: usize, spaces: usize) -> usize {
    let quotient = indent / spaces;
    let twice_remainder = (indent % spaces) * 2;
    let rounded = if twice_remainder > spaces || (twice_remainder == spaces && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded * spaces
}

/// Trailing whitespace at the end of a line.
#[derive(Debug)]
pub struct TrailingSpacesCheck {
    trailing: Regex,
}

impl Default for TrailingSpacesCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl TrailingSpacesCheck {
    #[must_use]
    pub fn new() -> Self {
        Self {
            trailing: Regex::new(r"\s+$").expect("Invalid regex"),
        }
    }
}

impl Checker for TrailingSpacesCheck {
    fn check(&self, file: &SourceFile<'_>, settings: &Settings, findings: &mut FileReport) -> Result<()> {
        if !settings.trailingspaces {
            return Ok(());
        }

        for (idx, line) in file.lines().iter().copied().enumerate() {
            let number = idx + 1;
            if !self.trailing.is_match(line) {
                continue;
            }
            if settings.trailingspaces_to_ignores && file.is_line_ignored(number) {
                continue;
            }
            if settings.trailingspaces_skip_blanks && line.trim().is_empty() {
                continue;
            }
            findings.push(ValidationError::from_kind(MessageKind::Trailingspaces, number)?);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "line_tests.rs"]
mod tests;
