use std::path::{Path, PathBuf};

use crate::config::mock_fs::MockFileSystem;
use crate::config::{EndOfLine, IgnoreSpec, Indentation};

use super::*;

fn load(fs: &MockFileSystem, defaults: &Settings, file: &str) -> Result<Settings> {
    SettingsLoader::new(fs).load(defaults, Path::new(file))
}

#[test]
fn defaults_pass_through_when_no_layers_are_enabled() {
    let fs = MockFileSystem::new()
        .with_file("/project/.spaceguardrc", r#"{"trailingspaces": true}"#)
        .with_file("/project/a.js", "");

    let settings = load(&fs, &Settings::default(), "/project/a.js").unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn rc_lookup_merges_user_config_then_project_files() {
    let fs = MockFileSystem::new()
        .with_current_dir("/work/app")
        .with_config_dir(Some(PathBuf::from("/home/me/.config/spaceguard")))
        .with_file(
            "/home/me/.config/spaceguard/config",
            r#"{"indentation": "tabs", "newline": true, "spaces": 8}"#,
        )
        .with_file("/work/.spaceguardrc", "indentation = \"spaces\"\nspaces = 2\n")
        .with_file("/work/app/.spaceguardrc", r#"{"spaces": 4}"#)
        .with_file("/work/app/a.js", "");

    let defaults = Settings {
        rcconfig: RcConfig::Lookup,
        ..Settings::default()
    };
    let settings = load(&fs, &defaults, "/work/app/a.js").unwrap();

    assert_eq!(settings.indentation, Some(Indentation::Spaces));
    assert_eq!(settings.spaces, Some(4));
    assert!(settings.newline);
}

#[test]
fn rc_path_overrides_options() {
    let fs = MockFileSystem::new()
        .with_file(
            "/cfg/custom.json",
            r#"{"indentation": "spaces", "trailingspaces": false, "newline": false}"#,
        )
        .with_file("/project/a.js", "");

    let defaults = Settings {
        trailingspaces: true,
        newline: true,
        indentation: Some(Indentation::Tabs),
        newline_maximum: None,
        ignores: vec![IgnoreSpec::named("js-comments")],
        rcconfig: RcConfig::Path(PathBuf::from("/cfg/custom.json")),
        ..Settings::default()
    };
    let settings = load(&fs, &defaults, "/project/a.js").unwrap();

    assert!(!settings.trailingspaces);
    assert!(!settings.newline);
    assert_eq!(settings.indentation, Some(Indentation::Spaces));
    // Untouched by the layer:
    assert_eq!(settings.spaces, Some(4));
    assert_eq!(settings.newline_maximum, None);
    assert_eq!(settings.ignores, vec![IgnoreSpec::named("js-comments")]);
}

#[test]
fn rc_path_missing_is_config_not_found() {
    let fs = MockFileSystem::new().with_file("/project/a.js", "");
    let defaults = Settings {
        rcconfig: RcConfig::Path(PathBuf::from("/nope/.spaceguardrc")),
        ..Settings::default()
    };

    let err = load(&fs, &defaults, "/project/a.js").unwrap_err();
    assert!(matches!(
        err,
        SpaceGuardError::ConfigNotFound {
            kind: ConfigKind::Rc,
            ..
        }
    ));
}

#[test]
fn rc_path_directory_is_config_path_invalid() {
    let fs = MockFileSystem::new()
        .with_dir("/cfg")
        .with_file("/project/a.js", "");
    let defaults = Settings {
        rcconfig: RcConfig::Path(PathBuf::from("/cfg")),
        ..Settings::default()
    };

    let err = load(&fs, &defaults, "/project/a.js").unwrap_err();
    assert!(matches!(
        err,
        SpaceGuardError::ConfigPathInvalid {
            kind: ConfigKind::Rc,
            ..
        }
    ));
}

#[test]
fn rc_parse_errors_name_the_file() {
    let fs = MockFileSystem::new()
        .with_file("/cfg/bad.json", r#"{"spaces": "four"}"#)
        .with_file("/project/a.js", "");
    let defaults = Settings {
        rcconfig: RcConfig::Path(PathBuf::from("/cfg/bad.json")),
        ..Settings::default()
    };

    let err = load(&fs, &defaults, "/project/a.js").unwrap_err();
    assert!(matches!(err, SpaceGuardError::ConfigParse { .. }));
    assert!(err.to_string().contains("/cfg/bad.json"));
}

#[test]
fn editorconfig_overrides_rc_and_options() {
    let fs = MockFileSystem::new()
        .with_file(
            "/project/.editorconfig",
            "root = true\n\n[*]\nindent_style = tab\nindent_size = 4\ninsert_final_newline = true\ntrim_trailing_whitespace = true\n",
        )
        .with_file("/project/.spaceguardrc", r#"{"indentation": "spaces"}"#)
        .with_file("/project/src/a.js", "");

    let defaults = Settings {
        newline: false,
        indentation: None,
        spaces: Some(2),
        trailingspaces: false,
        rcconfig: RcConfig::Lookup,
        editorconfig: Some(PathBuf::from("/project/.editorconfig")),
        ..Settings::default()
    };
    let settings = load(&fs, &defaults, "/project/src/a.js").unwrap();

    assert!(settings.newline);
    assert_eq!(settings.indentation, Some(Indentation::Tabs));
    assert_eq!(settings.spaces, Some(4));
    assert!(settings.trailingspaces);
}

#[test]
fn editorconfig_named_by_rc_is_applied() {
    let fs = MockFileSystem::new()
        .with_file("/project/.editorconfig", "[*.js]\nend_of_line = crlf\n")
        .with_file(
            "/project/.spaceguardrc",
            r#"{"editorconfig": "/project/.editorconfig"}"#,
        )
        .with_file("/project/a.js", "");

    let defaults = Settings {
        rcconfig: RcConfig::Lookup,
        ..Settings::default()
    };
    let settings = load(&fs, &defaults, "/project/a.js").unwrap();

    assert_eq!(settings.end_of_line, Some(EndOfLine::Crlf));
}

#[test]
fn editorconfig_missing_is_config_not_found() {
    let fs = MockFileSystem::new().with_file("/project/a.js", "");
    let defaults = Settings {
        editorconfig: Some(PathBuf::from("/project/.editorconfig")),
        ..Settings::default()
    };

    let err = load(&fs, &defaults, "/project/a.js").unwrap_err();
    assert!(matches!(
        err,
        SpaceGuardError::ConfigNotFound {
            kind: ConfigKind::EditorConfig,
            ..
        }
    ));
}

#[test]
fn editorconfig_directory_is_config_path_invalid() {
    let fs = MockFileSystem::new()
        .with_dir("/project/conf")
        .with_file("/project/a.js", "");
    let defaults = Settings {
        editorconfig: Some(PathBuf::from("/project/conf")),
        ..Settings::default()
    };

    let err = load(&fs, &defaults, "/project/a.js").unwrap_err();
    assert!(matches!(
        err,
        SpaceGuardError::ConfigPathInvalid {
            kind: ConfigKind::EditorConfig,
            ..
        }
    ));
}

#[test]
fn parse_rc_accepts_json_and_toml() {
    let json = parse_rc(Path::new("a"), r#"{"newlineMaximum": 2, "endOfLine": "crlf"}"#).unwrap();
    assert_eq!(json.newline_maximum, Some(Some(2)));
    assert_eq!(json.end_of_line, Some(Some(EndOfLine::Crlf)));

    let toml = parse_rc(Path::new("a"), "newlineMaximum = false\nallowsBOM = true\n").unwrap();
    assert_eq!(toml.newline_maximum, Some(None));
    assert_eq!(toml.allows_bom, Some(true));
}
