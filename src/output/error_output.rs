//! Error output for files that could not be validated.
//!
//! Format: `✖ {error_type}: {message}` followed by an optional `  × {detail}`.

use std::io::{IsTerminal, Write};

use crate::error::SpaceGuardError;

use super::ColorMode;
use super::ansi;

/// Error output formatter with color support.
pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => Self::stderr_supports_color(),
        };
        Self { use_colors }
    }

    /// Creates an error output formatter that auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    fn stderr_supports_color() -> bool {
        // Presence of NO_COLOR (any value) disables color.
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }
        std::io::stderr().is_terminal()
    }

    /// Prints an error, its category and the first underlying cause.
    pub fn print(&self, error: &SpaceGuardError) {
        let mut stderr = std::io::stderr().lock();
        self.write(&mut stderr, error);
    }

    /// Writes an error to a writer (for testing).
    pub fn write<W: Write>(&self, w: &mut W, error: &SpaceGuardError) {
        let detail = std::error::Error::source(error).map(ToString::to_string);
        self.write_error(w, error.error_type(), &error.to_string(), detail.as_deref());
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
    ) {
        // Failing to report to stderr is not itself reportable.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{}✖ {error_type}:{} {message}",
                ansi::BOLD,
                ansi::RED,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "✖ {error_type}: {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
