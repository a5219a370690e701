#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the space-guard binary.
#[macro_export]
macro_rules! space_guard {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("space-guard"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        self.create_bytes(relative_path, content.as_bytes());
    }

    /// Creates a file with raw bytes, for encodings other than UTF-8.
    pub fn create_bytes(&self, relative_path: &str, content: &[u8]) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the absolute path of a fixture file.
    pub fn file(&self, relative_path: &str) -> PathBuf {
        self.dir.path().join(relative_path)
    }

    /// Creates a `.spaceguardrc` in the fixture root.
    pub fn create_rc(&self, content: &str) {
        self.create_file(".spaceguardrc", content);
    }

    /// Reads a file back from the temp directory.
    pub fn read(&self, relative_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative_path)).expect("Failed to read file")
    }
}

pub const CLEAN_JS: &str = "function a() {\n    return 1;\n}\n";

pub const TRAILING_JS: &str = "function a() {  \n    return 1;\n}\n";

/// A block comment whose inner line carries trailing whitespace.
pub const COMMENTED_JS: &str = "/*\n * note  \n */\nvar a = 1;\n";
