use std::path::{Path, PathBuf};

use crate::error::{ConfigKind, Result, SpaceGuardError};

use super::editorconfig::EditorConfig;
use super::filesystem::{FileSystem, RealFileSystem, absolute_path};
use super::model::{APP_NAME, RcConfig, Settings, SettingsOverlay};

const USER_CONFIG_NAME: &str = "config";

/// Produces the final merged settings for one file.
pub trait SettingsProvider {
    /// Overlay the configured layers onto `defaults` for the file at `path`.
    ///
    /// # Errors
    /// Returns an error if a named config file is missing, is not a file,
    /// or cannot be parsed.
    fn load(&self, defaults: &Settings, path: &Path) -> Result<Settings>;
}

/// Loads rc and editorconfig layers from the filesystem.
///
/// Layers, lowest to highest priority:
/// 1. the given defaults (engine options)
/// 2. the rc layer, per `Settings::rcconfig`:
///    - `Lookup`: the user config (`<config dir>/spaceguard/config`), then
///      every `.spaceguardrc` from the filesystem root down to the current
///      directory
///    - `Path(p)`: exactly `p`
/// 3. the editorconfig layer, per `Settings::editorconfig`
#[derive(Debug)]
pub struct SettingsLoader<'f, F: FileSystem = RealFileSystem> {
    fs: &'f F,
}

impl<'f, F: FileSystem> SettingsLoader<'f, F> {
    #[must_use]
    pub const fn new(fs: &'f F) -> Self {
        Self { fs }
    }

    fn rc_file_name() -> String {
        format!(".{APP_NAME}rc")
    }

    /// rc files found by application name, lowest priority first.
    fn discover_rc_files(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();

        if let Some(user) = self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
            && self.fs.is_file(&user)
        {
            found.push(user);
        }

        if let Ok(cwd) = self.fs.current_dir() {
            let name = Self::rc_file_name();
            let mut project: Vec<PathBuf> = cwd
                .ancestors()
                .map(|dir| dir.join(&name))
                .filter(|candidate| self.fs.is_file(candidate))
                .collect();
            // ancestors() yields nearest first; nearer files must win.
            project.reverse();
            found.extend(project);
        }

        found
    }

    fn require_file(&self, kind: ConfigKind, path: &Path) -> Result<()> {
        if !self.fs.exists(path) {
            return Err(SpaceGuardError::ConfigNotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        if !self.fs.is_file(path) {
            return Err(SpaceGuardError::ConfigPathInvalid {
                kind,
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn read_config(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .map_err(|source| SpaceGuardError::FileRead {
                path: path.to_path_buf(),
                source,
            })
    }

    fn apply_rc_file(&self, path: &Path, settings: &mut Settings) -> Result<()> {
        let content = self.read_config(path)?;
        let overlay = parse_rc(path, &content)?;
        tracing::debug!("Applying rc config {}", path.display());
        overlay.apply(settings)
    }

    fn apply_rc(&self, settings: &mut Settings) -> Result<()> {
        match settings.rcconfig.clone() {
            RcConfig::Off => Ok(()),
            RcConfig::Lookup => {
                for path in self.discover_rc_files() {
                    self.apply_rc_file(&path, settings)?;
                }
                Ok(())
            }
            RcConfig::Path(path) => {
                self.require_file(ConfigKind::Rc, &path)?;
                self.apply_rc_file(&path, settings)
            }
        }
    }

    fn apply_editorconfig(&self, settings: &mut Settings, file: &Path) -> Result<()> {
        let Some(config_path) = settings.editorconfig.clone() else {
            return Ok(());
        };
        self.require_file(ConfigKind::EditorConfig, &config_path)?;

        let content = self.read_config(&config_path)?;
        let config_path = self.normalize(&config_path);
        let file = self.normalize(file);
        let overlay = EditorConfig::parse(&config_path, &content).overlay_for(&file);
        tracing::debug!(
            "Applying editorconfig {} to {}",
            config_path.display(),
            file.display()
        );
        overlay.apply(settings)
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        self.fs
            .canonicalize(path)
            .unwrap_or_else(|_| absolute_path(self.fs, path))
    }
}

impl<F: FileSystem> SettingsProvider for SettingsLoader<'_, F> {
    fn load(&self, defaults: &Settings, path: &Path) -> Result<Settings> {
        let mut settings = defaults.clone();
        self.apply_rc(&mut settings)?;
        self.apply_editorconfig(&mut settings, path)?;
        Ok(settings)
    }
}

/// Parse an rc file. JSON objects are read as JSON, anything else as TOML.
///
/// # Errors
/// Returns `ConfigParse` if the content is not a valid settings layer.
pub fn parse_rc(path: &Path, content: &str) -> Result<SettingsOverlay> {
    let parsed = if content.trim_start().starts_with('{') {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        toml::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| SpaceGuardError::ConfigParse {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
