use std::path::PathBuf;

use super::*;

#[test]
fn error_display_path_invalid() {
    let err = SpaceGuardError::PathInvalid {
        path: PathBuf::from("missing.js"),
    };
    assert_eq!(err.to_string(), "\"missing.js\" does not exist.");
}

#[test]
fn error_display_path_is_not_file() {
    let err = SpaceGuardError::PathIsNotFile {
        path: PathBuf::from("src"),
    };
    assert_eq!(err.to_string(), "\"src\" is not a file.");
}

#[test]
fn error_display_config_not_found_names_layer() {
    let err = SpaceGuardError::ConfigNotFound {
        kind: ConfigKind::EditorConfig,
        path: PathBuf::from(".editorconfig"),
    };
    assert_eq!(
        err.to_string(),
        "The editorconfig file \".editorconfig\" wasn't found."
    );

    let err = SpaceGuardError::ConfigNotFound {
        kind: ConfigKind::Rc,
        path: PathBuf::from(".spaceguardrc"),
    };
    assert!(err.to_string().starts_with("The rcconfig file"));
}

#[test]
fn error_display_newline_maximum_invalid() {
    let err = SpaceGuardError::NewlineMaximumInvalid { value: 0 };
    assert_eq!(
        err.to_string(),
        "The value \"0\" for the maximum of newlines is invalid."
    );
}

#[test]
fn error_display_file_read() {
    let err = SpaceGuardError::FileRead {
        path: PathBuf::from("test.rs"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    };
    assert!(err.to_string().contains("test.rs"));
}

#[test]
fn error_type_returns_correct_type() {
    assert_eq!(
        SpaceGuardError::PathInvalid {
            path: PathBuf::from("a")
        }
        .error_type(),
        "Path"
    );
    assert_eq!(
        SpaceGuardError::ConfigPathInvalid {
            kind: ConfigKind::Rc,
            path: PathBuf::from("a")
        }
        .error_type(),
        "Config"
    );
    assert_eq!(
        SpaceGuardError::NewlineMaximumInvalid { value: -1 }.error_type(),
        "Settings"
    );
    assert_eq!(
        SpaceGuardError::MissingField { field: "code" }.error_type(),
        "Record"
    );
    assert_eq!(SpaceGuardError::InvalidPayload.error_type(), "Record");
    assert_eq!(
        SpaceGuardError::Io(std::io::Error::other("test")).error_type(),
        "IO"
    );
}

#[test]
fn invalid_pattern_keeps_regex_source() {
    let source = regex::Regex::new("(").unwrap_err();
    let err = SpaceGuardError::InvalidPattern {
        pattern: "(".to_string(),
        source,
    };
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(err.error_type(), "Pattern");
}
