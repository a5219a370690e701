use std::ops::{Range, RangeInclusive};

use indexmap::IndexMap;
use regex::Regex;

use crate::error::{Result, SpaceGuardError};

const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("xml-comments", r"<!--[\s\S]*?-->"),
    ("html-comments", r"<!--[\s\S]*?-->"),
    ("c-comments", r"/\*\*?[\s\S]*?\*/"),
    ("java-comments", r"/\*\*?[\s\S]*?\*/"),
    ("js-comments", r"/\*\*?[\s\S]*?\*/"),
    ("as-comments", r"/\*\*?[\s\S]*?\*/"),
    ("python-comments", r"'''[\s\S]*?'''"),
    ("ruby-comments", r"=begin[\s\S]*?=end"),
    ("applescript-comments", r"\(\*[\s\S]*?\*\)"),
];

/// Named regions (mostly block comments) that may be excluded from checks.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatternCatalog {
    patterns: IndexMap<String, Regex>,
}

impl IgnorePatternCatalog {
    /// The catalog of block-comment patterns shipped with the tool.
    #[must_use]
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(id, pattern)| {
                (
                    (*id).to_string(),
                    Regex::new(pattern).expect("Invalid built-in ignore pattern"),
                )
            })
            .collect();
        Self { patterns }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace a pattern.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if `pattern` does not compile.
    pub fn insert(&mut self, id: impl Into<String>, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| SpaceGuardError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.insert(id.into(), regex);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Regex> {
        self.patterns.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Regex)> {
        self.patterns.iter().map(|(id, regex)| (id.as_str(), regex))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Lines and byte spans covered by multi-line ignore matches.
///
/// Patterns are applied in order against the whole text; a match touching a
/// span claimed by an earlier pattern is skipped. A match that does not span a line
/// break is dropped. The first line of a match is still checked; the lines
/// after it, through the line holding the match's last character, are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredRegions {
    spans: Vec<Range<usize>>,
    lines: Vec<RangeInclusive<usize>>,
}

impl IgnoredRegions {
    #[must_use]
    pub fn index(text: &str, patterns: &[&Regex]) -> Self {
        let mut spans: Vec<Range<usize>> = Vec::new();

        for pattern in patterns {
            let found = find_unclaimed(text, pattern, &spans);
            spans.extend(found);
            spans.sort_by_key(|span| span.start);
        }

        let lines = merge_lines(spans.iter().filter_map(|span| {
            let first = text[..span.start].matches('\n').count() + 1;
            let last = first + text[span.clone()].matches('\n').count();
            (last > first).then(|| first + 1..=last)
        }));

        Self { spans, lines }
    }

    /// Whether the 1-indexed `line` lies inside an ignored region.
    #[must_use]
    pub fn is_line_ignored(&self, line: usize) -> bool {
        let idx = self.lines.partition_point(|range| *range.end() < line);
        self.lines.get(idx).is_some_and(|range| range.contains(&line))
    }

    /// Whether byte `offset` of the text lies inside an ignore match.
    #[must_use]
    pub fn contains_offset(&self, offset: usize) -> bool {
        let idx = self.spans.partition_point(|span| span.end <= offset);
        self.spans.get(idx).is_some_and(|span| span.contains(&offset))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Ignored line ranges, sorted and merged.
    #[must_use]
    pub fn line_ranges(&self) -> &[RangeInclusive<usize>] {
        &self.lines
    }

    #[must_use]
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }
}

/// Multi-line matches of `pattern` that do not touch a `claimed` span.
///
/// The whole text is searched so anchors and word boundaries keep their
/// meaning; matches overlapping a claimed span are skipped.
fn find_unclaimed(text: &str, pattern: &Regex, claimed: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while cursor <= text.len() {
        let Some(m) = pattern.find_at(text, cursor) else {
            break;
        };
        let span = m.range();

        if let Some(hit) = claimed
            .iter()
            .find(|c| c.start < span.end.max(span.start + 1) && span.start < c.end)
        {
            cursor = if hit.contains(&span.start) {
                hit.end
            } else {
                next_char(text, span.start)
            };
            continue;
        }

        if m.as_str().contains('\n') {
            found.push(span.clone());
        }
        cursor = if span.is_empty() {
            next_char(text, span.end)
        } else {
            span.end
        };
    }
    found
}

/// Offset of the character after the one starting at `offset`.
fn next_char(text: &str, offset: usize) -> usize {
    offset + text[offset..].chars().next().map_or(1, char::len_utf8)
}

fn merge_lines(
    ranges: impl Iterator<Item = RangeInclusive<usize>>,
) -> Vec<RangeInclusive<usize>> {
    let mut ranges: Vec<_> = ranges.collect();
    ranges.sort_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<usize>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if let Some(last) = merged.last_mut()
            && *range.start() <= *last.end() + 1
        {
            if range.end() > last.end() {
                *last = *last.start()..=*range.end();
            }
            continue;
        }
        merged.push(range);
    }
    merged
}

#[cfg(test)]
#[path = "ignores_tests.rs"]
mod tests;
