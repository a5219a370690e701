use std::path::Path;

use regex::Regex;

use crate::error::{Result, SpaceGuardError};

use super::ignores::IgnoredRegions;

/// Decode raw file bytes using a configured encoding name.
///
/// Names are matched case-insensitively with `-` and `_` dropped, so `UTF-8`,
/// `utf_8` and `utf8` are the same. UTF-8 input is decoded strictly; a
/// byte order mark is kept as the first character.
///
/// # Errors
/// Returns `UnsupportedEncoding` for unknown names and `Decode` if the bytes
/// are not valid in the chosen encoding.
pub fn decode(bytes: &[u8], encoding: &str, path: &Path) -> Result<String> {
    let normalized: String = encoding
        .chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .collect::<String>()
        .to_ascii_lowercase();

    match normalized.as_str() {
        "utf8" | "utf8bom" => {
            String::from_utf8(bytes.to_vec()).map_err(|_| SpaceGuardError::Decode {
                path: path.to_path_buf(),
                encoding: encoding.to_string(),
            })
        }
        "latin1" | "iso88591" | "binary" => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        "ascii" => {
            if bytes.is_ascii() {
                Ok(bytes.iter().map(|&b| char::from(b)).collect())
            } else {
                Err(SpaceGuardError::Decode {
                    path: path.to_path_buf(),
                    encoding: encoding.to_string(),
                })
            }
        }
        _ => Err(SpaceGuardError::UnsupportedEncoding {
            encoding: encoding.to_string(),
        }),
    }
}

/// Split on `\n` or `\r\n`. A lone `\r` stays part of its line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// A decoded file ready for checking.
#[derive(Debug)]
pub struct SourceFile<'t> {
    text: &'t str,
    lines: Vec<&'t str>,
    ignored: IgnoredRegions,
}

impl<'t> SourceFile<'t> {
    #[must_use]
    pub fn new(text: &'t str, ignore_patterns: &[&Regex]) -> Self {
        Self {
            text,
            lines: split_lines(text),
            ignored: IgnoredRegions::index(text, ignore_patterns),
        }
    }

    /// The decoded text, unmodified.
    #[must_use]
    pub const fn text(&self) -> &'t str {
        self.text
    }

    /// Lines without their terminators. Always holds at least one entry.
    #[must_use]
    pub fn lines(&self) -> &[&'t str] {
        &self.lines
    }

    #[must_use]
    pub const fn ignored(&self) -> &IgnoredRegions {
        &self.ignored
    }

    /// Whether the 1-indexed `line` lies in an ignored region.
    #[must_use]
    pub fn is_line_ignored(&self, line: usize) -> bool {
        self.ignored.is_line_ignored(line)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
