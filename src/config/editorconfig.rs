//! `.editorconfig` reading and mapping onto settings.
//!
//! Only the properties that have a whitespace meaning are mapped:
//!
//! | editorconfig               | setting          |
//! |----------------------------|------------------|
//! | `charset`                  | `encoding`       |
//! | `insert_final_newline`     | `newline`        |
//! | `indent_style`             | `indentation`    |
//! | `indent_size`              | `spaces`         |
//! | `trim_trailing_whitespace` | `trailingspaces` |
//! | `end_of_line`              | `endOfLine`      |
//!
//! Values with the wrong type are dropped silently, like editors do.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use indexmap::IndexMap;

use super::model::{EndOfLine, Indentation, SettingsOverlay};

struct Section {
    matcher: GlobMatcher,
    properties: Vec<(String, String)>,
}

/// A parsed `.editorconfig` file.
pub struct EditorConfig {
    dir: PathBuf,
    sections: Vec<Section>,
}

impl EditorConfig {
    /// Parse editorconfig `content` located at `config_path`.
    ///
    /// Sections with a glob that cannot be compiled are skipped.
    #[must_use]
    pub fn parse(config_path: &Path, content: &str) -> Self {
        let dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut sections: Vec<Section> = Vec::new();
        let mut current: Option<Section> = None;
        let mut in_skipped_section = false;

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                if let Some(section) = current.take() {
                    sections.push(section);
                }
                match compile_section_glob(name) {
                    Some(matcher) => {
                        current = Some(Section {
                            matcher,
                            properties: Vec::new(),
                        });
                        in_skipped_section = false;
                    }
                    None => {
                        tracing::warn!("Skipping editorconfig section with invalid glob [{name}]");
                        in_skipped_section = true;
                    }
                }
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if in_skipped_section {
                continue;
            }
            // Properties before the first section (e.g. `root = true`) are preamble.
            if let Some(section) = current.as_mut() {
                section
                    .properties
                    .push((key.trim().to_lowercase(), value.trim().to_string()));
            }
        }
        if let Some(section) = current {
            sections.push(section);
        }

        Self { dir, sections }
    }

    /// Collect the properties that apply to `file`. Later sections win.
    ///
    /// `file` must be absolute and normalized the same way as the config path.
    #[must_use]
    pub fn properties_for(&self, file: &Path) -> IndexMap<String, String> {
        let mut properties = IndexMap::new();
        let Ok(relative) = file.strip_prefix(&self.dir) else {
            return properties;
        };

        for section in &self.sections {
            if section.matcher.is_match(relative) {
                for (key, value) in &section.properties {
                    properties.insert(key.clone(), value.clone());
                }
            }
        }
        properties
    }

    /// Map the properties that apply to `file` onto a settings layer.
    #[must_use]
    pub fn overlay_for(&self, file: &Path) -> SettingsOverlay {
        overlay_from_properties(&self.properties_for(file))
    }
}

fn compile_section_glob(name: &str) -> Option<GlobMatcher> {
    let pattern = if name.contains('/') {
        name.trim_start_matches('/').to_string()
    } else {
        format!("**/{name}")
    };
    GlobBuilder::new(&pattern)
        .literal_separator(true)
        .build()
        .ok()
        .map(|glob| glob.compile_matcher())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Translate editorconfig properties into a settings layer.
#[must_use]
pub fn overlay_from_properties(properties: &IndexMap<String, String>) -> SettingsOverlay {
    let mut overlay = SettingsOverlay::default();

    for (key, raw) in properties {
        let value = raw.to_lowercase();
        match key.as_str() {
            "charset" if !value.is_empty() && value != "unset" => {
                overlay.encoding = Some(value);
            }
            "insert_final_newline" => {
                if let Some(flag) = parse_bool(&value) {
                    overlay.newline = Some(flag);
                }
            }
            "indent_style" => match value.as_str() {
                "tab" => overlay.indentation = Some(Some(Indentation::Tabs)),
                "space" => overlay.indentation = Some(Some(Indentation::Spaces)),
                _ => {}
            },
            "indent_size" => {
                if let Ok(size) = value.parse::<usize>() {
                    overlay.spaces = Some(size);
                }
            }
            "trim_trailing_whitespace" => {
                if let Some(flag) = parse_bool(&value) {
                    overlay.trailingspaces = Some(flag);
                }
            }
            "end_of_line" => {
                if let Ok(eol) = value.parse::<EndOfLine>() {
                    overlay.end_of_line = Some(Some(eol));
                }
            }
            _ => {}
        }
    }
    overlay
}

#[cfg(test)]
#[path = "editorconfig_tests.rs"]
mod tests;
