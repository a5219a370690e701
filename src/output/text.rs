use std::fmt::Write;
use std::io::Write as IoWrite;

use crate::checker::{FileReport, Severity, ValidationError};
use crate::error::Result;

use super::{CheckOutcome, OutputFormatter, ansi};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

pub struct TextFormatter {
    use_colors: bool,
    show_payloads: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            show_payloads: false,
        }
    }

    /// Print each finding's payload under its message.
    #[must_use]
    pub const fn with_payloads(mut self, show: bool) -> Self {
        self.show_payloads = show;
        self
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                // Check if stdout is a TTY
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Warning => ansi::YELLOW,
            Severity::Hint => ansi::CYAN,
        }
    }

    fn format_finding(&self, error: &ValidationError, output: &mut Vec<u8>) {
        let severity = error.severity();
        let label = self.colorize(severity.as_str(), Self::severity_color(severity));
        let line = self.colorize(&format!("{:>5}", error.line()), ansi::DIM);

        writeln!(output, "{line}  {label}  {}  {}", error.message(), error.code()).ok();

        if self.show_payloads
            && let Some(payload) = error.payload()
        {
            let fields: Vec<String> = payload
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            writeln!(output, "         {}", fields.join(", ")).ok();
        }
    }

    fn format_file(&self, path: &str, findings: &FileReport, output: &mut Vec<u8>) {
        writeln!(output, "{}", self.colorize(path, ansi::BOLD)).ok();
        for error in findings.errors() {
            self.format_finding(error, output);
        }
    }

    fn format_summary(&self, outcome: &CheckOutcome) -> String {
        let warnings = outcome.warnings();
        let hints = outcome.hints();
        let flagged = outcome.report.file_count();

        let warnings_str = if warnings > 0 {
            self.colorize(&warnings.to_string(), ansi::YELLOW)
        } else {
            self.colorize(&warnings.to_string(), ansi::GREEN)
        };
        let hints_str = self.colorize(&hints.to_string(), ansi::CYAN);

        let mut summary = format!(
            "Summary: {} files checked, {flagged} with findings, {warnings_str} warnings, {hints_str} hints",
            outcome.files_checked
        );

        if !outcome.failures.is_empty() {
            let errors_str = self.colorize(&outcome.failures.len().to_string(), ansi::RED);
            let _ = write!(summary, ", {errors_str} errors");
        }

        summary
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &CheckOutcome) -> Result<String> {
        let mut output = Vec::new();

        for (path, findings) in outcome.report.files() {
            self.format_file(&path.display().to_string(), findings, &mut output);
            writeln!(output).ok();
        }

        writeln!(output, "{}", self.format_summary(outcome)).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
