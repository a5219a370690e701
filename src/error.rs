use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which settings layer a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Rc,
    EditorConfig,
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rc => f.write_str("rcconfig"),
            Self::EditorConfig => f.write_str("editorconfig"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SpaceGuardError {
    #[error("\"{}\" does not exist.", path.display())]
    PathInvalid { path: PathBuf },

    #[error("\"{}\" is not a file.", path.display())]
    PathIsNotFile { path: PathBuf },

    #[error("The {kind} file \"{}\" wasn't found.", path.display())]
    ConfigNotFound { kind: ConfigKind, path: PathBuf },

    #[error("The {kind} path \"{}\" is not a file.", path.display())]
    ConfigPathInvalid { kind: ConfigKind, path: PathBuf },

    #[error("Failed to parse config file {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("The value \"{value}\" for the maximum of newlines is invalid.")]
    NewlineMaximumInvalid { value: i64 },

    #[error("Missing {field} in validation error data.")]
    MissingField { field: &'static str },

    #[error("The payload of a validation error must be an object.")]
    InvalidPayload,

    #[error("Invalid ignore pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Unsupported encoding: {encoding}")]
    UnsupportedEncoding { encoding: String },

    #[error("Failed to decode {} as {encoding}", path.display())]
    Decode { path: PathBuf, encoding: String },

    #[error("Failed to read file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl SpaceGuardError {
    /// Short category name used by machine-readable error output.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::PathInvalid { .. } | Self::PathIsNotFile { .. } => "Path",
            Self::ConfigNotFound { .. }
            | Self::ConfigPathInvalid { .. }
            | Self::ConfigParse { .. } => "Config",
            Self::NewlineMaximumInvalid { .. } => "Settings",
            Self::MissingField { .. } | Self::InvalidPayload => "Record",
            Self::InvalidPattern { .. } | Self::InvalidGlob { .. } => "Pattern",
            Self::UnsupportedEncoding { .. } | Self::Decode { .. } => "Encoding",
            Self::FileRead { .. } | Self::Io(_) => "IO",
            Self::JsonSerialize(_) => "Serialization",
        }
    }
}

pub type Result<T> = std::result::Result<T, SpaceGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
