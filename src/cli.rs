use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{EndOfLine, IgnoreEntry, Indentation, RcConfig, Settings, SettingsOverlay};
use crate::error::Result;
use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "space-guard")]
#[command(author, version, about = "Check indentation, trailing whitespace, newlines and line endings")]
#[command(long_about = "A tool to validate the whitespace style of text files.\n\n\
    Exit codes:\n  \
    0 - No violations found\n  \
    1 - Violations found\n  \
    2 - Configuration or input error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check files for whitespace violations
    Check(CheckArgs),

    /// List the built-in ignore patterns
    Patterns,
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Paths to check (files or directories)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// File extensions to check in directories (comma-separated, e.g., js,xml,py)
    #[arg(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Encoding used to read files (utf8, latin1, ascii)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Require a single newline at the end of each file
    #[arg(long)]
    pub newline: bool,

    /// Maximum number of consecutive blank lines
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub newline_maximum: Option<i64>,

    /// Expected indentation style (tabs, spaces)
    #[arg(long)]
    pub indentation: Option<Indentation>,

    /// Indentation multiple in spaces mode
    #[arg(long, value_name = "N")]
    pub spaces: Option<usize>,

    /// Hint at indentation jumps of more than one level
    #[arg(long = "indentation-guess", alias = "guess")]
    pub indentation_guess: bool,

    /// Report trailing whitespace
    #[arg(long)]
    pub trailingspaces: bool,

    /// Don't report trailing whitespace inside ignored regions
    #[arg(long)]
    pub trailingspaces_to_ignores: bool,

    /// Don't report lines that only contain whitespace
    #[arg(long)]
    pub trailingspaces_skip_blanks: bool,

    /// Ignore regions by catalog id (see `patterns`; can be specified multiple times)
    #[arg(long = "ignores", value_name = "ID")]
    pub ignores: Vec<String>,

    /// Ignore regions matching a regular expression (can be specified multiple times)
    #[arg(long = "ignore-pattern", value_name = "REGEX")]
    pub ignore_patterns: Vec<String>,

    /// Allow a byte order mark before the indentation
    #[arg(long)]
    pub allows_bom: bool,

    /// Expected line terminator (lf, crlf, cr)
    #[arg(long)]
    pub end_of_line: Option<EndOfLine>,

    /// Load rc settings; without a value, look up `.spaceguardrc` files.
    /// A path must be attached with `=`, e.g. `--rcconfig=conf/.spaceguardrc`
    #[arg(long, value_name = "PATH", num_args = 0..=1, require_equals = true)]
    pub rcconfig: Option<Option<PathBuf>>,

    /// Apply an .editorconfig file
    #[arg(long, value_name = "PATH")]
    pub editorconfig: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Treat hints as failures (exit code 1)
    #[arg(long)]
    pub strict: bool,
}

impl CheckArgs {
    /// The settings layer given on the command line. Unset flags leave the
    /// defaults alone.
    #[must_use]
    pub fn overlay(&self) -> SettingsOverlay {
        let flag = |set: bool| set.then_some(true);

        let ignores = (!self.ignores.is_empty() || !self.ignore_patterns.is_empty()).then(|| {
            self.ignores
                .iter()
                .cloned()
                .map(IgnoreEntry::Named)
                .chain(
                    self.ignore_patterns
                        .iter()
                        .cloned()
                        .map(|pattern| IgnoreEntry::Pattern { pattern }),
                )
                .collect()
        });

        SettingsOverlay {
            encoding: self.encoding.clone(),
            newline: flag(self.newline),
            newline_maximum: self.newline_maximum.map(Some),
            indentation: self.indentation.map(Some),
            spaces: self.spaces,
            indentation_guess: flag(self.indentation_guess),
            trailingspaces: flag(self.trailingspaces),
            trailingspaces_to_ignores: flag(self.trailingspaces_to_ignores),
            trailingspaces_skip_blanks: flag(self.trailingspaces_skip_blanks),
            ignores,
            allows_bom: flag(self.allows_bom),
            end_of_line: self.end_of_line.map(Some),
            editorconfig: self.editorconfig.clone().map(Some),
        }
    }

    /// Engine options: defaults with the command-line layer applied.
    ///
    /// # Errors
    /// Returns an error if an `--ignore-pattern` does not compile.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();
        self.overlay().apply(&mut settings)?;
        settings.rcconfig = match &self.rcconfig {
            None => RcConfig::Off,
            Some(None) => RcConfig::Lookup,
            Some(Some(path)) => RcConfig::Path(path.clone()),
        };
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
