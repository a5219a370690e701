use std::fmt;

use serde::Serialize;

/// How serious a reported finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Hint,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every finding a check can produce, with its stable code and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    IndentationTabs,
    IndentationSpaces,
    IndentationSpacesAmount,
    IndentationGuess,
    Trailingspaces,
    Newline,
    NewlineAmount,
    NewlineMaximum,
    EndOfLine,
}

impl MessageKind {
    pub const ALL: [Self; 9] = [
        Self::IndentationTabs,
        Self::IndentationSpaces,
        Self::IndentationSpacesAmount,
        Self::IndentationGuess,
        Self::Trailingspaces,
        Self::Newline,
        Self::NewlineAmount,
        Self::NewlineMaximum,
        Self::EndOfLine,
    ];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::IndentationTabs => "INDENTATION_TABS",
            Self::IndentationSpaces => "INDENTATION_SPACES",
            Self::IndentationSpacesAmount => "INDENTATION_SPACES_AMOUNT",
            Self::IndentationGuess => "NEWLINE_GUESS",
            Self::Trailingspaces => "TRAILINGSPACES",
            Self::Newline => "NEWLINE",
            Self::NewlineAmount => "NEWLINE_AMOUNT",
            Self::NewlineMaximum => "NEWLINE_MAXIMUM",
            Self::EndOfLine => "END_OF_LINE",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::IndentationGuess => Severity::Hint,
            _ => Severity::Warning,
        }
    }

    /// Message template. `{a}` and `{b}` are filled in by [`Self::render`].
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::IndentationTabs => "Unexpected spaces found.",
            Self::IndentationSpaces => "Unexpected tabs found.",
            Self::IndentationSpacesAmount => "Expected an indentation at {a} instead of at {b}.",
            Self::IndentationGuess => {
                "The indentation in this line seems to be incorrect. The expected indention is {a}, but {b} was found."
            }
            Self::Trailingspaces => "Unexpected trailing spaces found.",
            Self::Newline => "Expected a newline at the end of the file.",
            Self::NewlineAmount => "Unexpected additional newlines at the end of the file.",
            Self::NewlineMaximum => {
                "Maximum amount of newlines exceeded. Found {a} newlines, expected maximum is {b}."
            }
            Self::EndOfLine => "Incorrect end of line character(s) found.",
        }
    }

    /// Fill the template's `{a}` and `{b}` placeholders.
    #[must_use]
    pub fn render(self, a: impl fmt::Display, b: impl fmt::Display) -> String {
        self.template()
            .replace("{a}", &a.to_string())
            .replace("{b}", &b.to_string())
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
