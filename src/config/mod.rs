mod editorconfig;
mod filesystem;
mod loader;
mod model;

#[cfg(test)]
pub(crate) mod mock_fs;

pub use editorconfig::{EditorConfig, overlay_from_properties};
pub use filesystem::{FileSystem, RealFileSystem, absolute_path};
pub use loader::{SettingsLoader, SettingsProvider, parse_rc};
pub use model::{
    APP_NAME, DEFAULT_ENCODING, DEFAULT_SPACES, EndOfLine, IgnoreEntry, IgnoreSpec, Indentation,
    RcConfig, Settings, SettingsOverlay,
};

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
