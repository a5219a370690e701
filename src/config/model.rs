use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SpaceGuardError};

/// Fixed application name used to discover rc files (`.spaceguardrc`).
pub const APP_NAME: &str = "spaceguard";

/// Encoding used when nothing else is configured.
pub const DEFAULT_ENCODING: &str = "utf8";

/// Indentation size used when nothing else is configured.
pub const DEFAULT_SPACES: usize = 4;

// ============================================================================
// Setting value types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indentation {
    Tabs,
    Spaces,
}

impl FromStr for Indentation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tabs" | "tab" => Ok(Self::Tabs),
            "spaces" | "space" => Ok(Self::Spaces),
            _ => Err(format!("Unknown indentation: {s}")),
        }
    }
}

/// A line terminator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfLine {
    Cr,
    Lf,
    Crlf,
}

impl EndOfLine {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cr => "CR",
            Self::Lf => "LF",
            Self::Crlf => "CRLF",
        }
    }
}

impl fmt::Display for EndOfLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndOfLine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CR" => Ok(Self::Cr),
            "LF" => Ok(Self::Lf),
            "CRLF" => Ok(Self::Crlf),
            _ => Err(format!("Unknown end of line: {s}")),
        }
    }
}

impl Serialize for EndOfLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EndOfLine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An `ignores` entry as written in a config file or on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IgnoreEntry {
    /// Identifier from the ignore pattern catalog, e.g. `js-comments`.
    Named(String),
    /// A user supplied regular expression.
    Pattern { pattern: String },
}

/// A resolved `ignores` entry: either a catalog id or a compiled pattern.
#[derive(Debug, Clone)]
pub enum IgnoreSpec {
    Named(String),
    Raw(Regex),
}

impl IgnoreSpec {
    /// Compile a raw pattern into an ignore spec.
    ///
    /// # Errors
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn raw(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self::Raw)
            .map_err(|source| SpaceGuardError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    #[must_use]
    pub fn named(id: impl Into<String>) -> Self {
        Self::Named(id.into())
    }

    /// Resolve a config entry.
    ///
    /// # Errors
    /// Returns an error if a raw pattern does not compile.
    pub fn from_entry(entry: &IgnoreEntry) -> Result<Self> {
        match entry {
            IgnoreEntry::Named(id) => Ok(Self::named(id.as_str())),
            IgnoreEntry::Pattern { pattern } => Self::raw(pattern),
        }
    }
}

impl PartialEq for IgnoreSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Raw(a), Self::Raw(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// How the rc layer is looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RcConfig {
    #[default]
    Off,
    /// Discover `.spaceguardrc` files and the user config by application name.
    Lookup,
    /// Load exactly this file.
    Path(PathBuf),
}

// ============================================================================
// Settings
// ============================================================================

/// Fully merged settings for one validated file.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    pub encoding: String,
    /// Require exactly one trailing newline.
    pub newline: bool,
    /// Cap on consecutive blank lines. Must be positive when set.
    pub newline_maximum: Option<i64>,
    pub indentation: Option<Indentation>,
    /// Expected indentation multiple in spaces mode. `Some(0)` counts as unset.
    pub spaces: Option<usize>,
    pub indentation_guess: bool,
    pub trailingspaces: bool,
    /// Suppress trailing-space reports inside ignored lines.
    pub trailingspaces_to_ignores: bool,
    pub trailingspaces_skip_blanks: bool,
    pub ignores: Vec<IgnoreSpec>,
    pub allows_bom: bool,
    pub end_of_line: Option<EndOfLine>,
    pub rcconfig: RcConfig,
    pub editorconfig: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            newline: false,
            newline_maximum: None,
            indentation: None,
            spaces: Some(DEFAULT_SPACES),
            indentation_guess: false,
            trailingspaces: false,
            trailingspaces_to_ignores: false,
            trailingspaces_skip_blanks: false,
            ignores: Vec::new(),
            allows_bom: false,
            end_of_line: None,
            rcconfig: RcConfig::Off,
            editorconfig: None,
        }
    }
}

impl Settings {
    /// The validated newline maximum, if the check is enabled.
    ///
    /// # Errors
    /// Returns `NewlineMaximumInvalid` if the configured value is not positive.
    pub fn newline_maximum(&self) -> Result<Option<usize>> {
        match self.newline_maximum {
            None => Ok(None),
            Some(value) => usize::try_from(value)
                .ok()
                .filter(|&max| max > 0)
                .map(Some)
                .ok_or(SpaceGuardError::NewlineMaximumInvalid { value }),
        }
    }

    /// The indentation multiple, if one is configured.
    #[must_use]
    pub fn spaces(&self) -> Option<usize> {
        self.spaces.filter(|&n| n > 0)
    }
}

// ============================================================================
// Partial settings (rc files, command line)
// ============================================================================

/// A partial settings layer. Unset fields leave the lower layer untouched.
///
/// Keys use the camelCase names shared with other whitespace linters
/// (`newlineMaximum`, `allowsBOM`, `endOfLine`, ...). `false` turns off the
/// options that are either disabled or carry a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverlay {
    #[serde(default)]
    pub encoding: Option<String>,

    #[serde(default)]
    pub newline: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub newline_maximum: Option<Option<i64>>,

    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub indentation: Option<Option<Indentation>>,

    #[serde(default)]
    pub spaces: Option<usize>,

    #[serde(default)]
    pub indentation_guess: Option<bool>,

    #[serde(default)]
    pub trailingspaces: Option<bool>,

    #[serde(default)]
    pub trailingspaces_to_ignores: Option<bool>,

    #[serde(default)]
    pub trailingspaces_skip_blanks: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_ignores")]
    pub ignores: Option<Vec<IgnoreEntry>>,

    #[serde(default, rename = "allowsBOM", alias = "allowsBom")]
    pub allows_bom: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub end_of_line: Option<Option<EndOfLine>>,

    #[serde(default, deserialize_with = "deserialize_toggle")]
    pub editorconfig: Option<Option<PathBuf>>,
}

impl SettingsOverlay {
    /// Write every set field of this layer onto `settings`.
    ///
    /// Arrays replace rather than append, so an overlay's `ignores` wins whole.
    ///
    /// # Errors
    /// Returns an error if a raw ignore pattern does not compile.
    pub fn apply(self, settings: &mut Settings) -> Result<()> {
        if let Some(ignores) = &self.ignores {
            settings.ignores = ignores
                .iter()
                .map(IgnoreSpec::from_entry)
                .collect::<Result<_>>()?;
        }

        if let Some(encoding) = self.encoding {
            settings.encoding = encoding;
        }
        if let Some(newline) = self.newline {
            settings.newline = newline;
        }
        if let Some(newline_maximum) = self.newline_maximum {
            settings.newline_maximum = newline_maximum;
        }
        if let Some(indentation) = self.indentation {
            settings.indentation = indentation;
        }
        if let Some(spaces) = self.spaces {
            settings.spaces = Some(spaces);
        }
        if let Some(guess) = self.indentation_guess {
            settings.indentation_guess = guess;
        }
        if let Some(trailingspaces) = self.trailingspaces {
            settings.trailingspaces = trailingspaces;
        }
        if let Some(to_ignores) = self.trailingspaces_to_ignores {
            settings.trailingspaces_to_ignores = to_ignores;
        }
        if let Some(skip_blanks) = self.trailingspaces_skip_blanks {
            settings.trailingspaces_skip_blanks = skip_blanks;
        }
        if let Some(allows_bom) = self.allows_bom {
            settings.allows_bom = allows_bom;
        }
        if let Some(end_of_line) = self.end_of_line {
            settings.end_of_line = end_of_line;
        }
        if let Some(editorconfig) = self.editorconfig {
            settings.editorconfig = editorconfig;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Toggle<T> {
    Flag(bool),
    Value(T),
}

fn deserialize_toggle<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Toggle::<T>::deserialize(deserializer)? {
        Toggle::Flag(false) => Ok(Some(None)),
        Toggle::Flag(true) => Err(serde::de::Error::custom(
            "expected `false` or a value, found `true`",
        )),
        Toggle::Value(value) => Ok(Some(Some(value))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IgnoresValue {
    Flag(bool),
    One(IgnoreEntry),
    Many(Vec<IgnoreEntry>),
}

fn deserialize_ignores<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<IgnoreEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    match IgnoresValue::deserialize(deserializer)? {
        IgnoresValue::Flag(false) => Ok(Some(Vec::new())),
        IgnoresValue::Flag(true) => Err(serde::de::Error::custom(
            "expected `false`, a pattern id or a list of ignores, found `true`",
        )),
        IgnoresValue::One(entry) => Ok(Some(vec![entry])),
        IgnoresValue::Many(entries) => Ok(Some(entries)),
    }
}
