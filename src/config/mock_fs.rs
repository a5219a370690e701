use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use crate::config::FileSystem;

/// In-memory filesystem for unit tests. Relative paths resolve against
/// the mock's current directory.
pub struct MockFileSystem {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    current_dir: PathBuf,
    config_dir: Option<PathBuf>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            dirs: HashSet::new(),
            current_dir: PathBuf::from("/project"),
            config_dir: None,
        }
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.with_bytes(path, content.as_bytes())
    }

    pub fn with_bytes(mut self, path: impl AsRef<Path>, content: &[u8]) -> Self {
        let path = self.resolve(path.as_ref());
        let mut parent = path.parent();
        while let Some(dir) = parent {
            self.dirs.insert(dir.to_path_buf());
            parent = dir.parent();
        }
        self.files.insert(path, content.to_vec());
        self
    }

    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        let path = self.resolve(path.as_ref());
        self.dirs.insert(path);
        self
    }

    pub fn with_current_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_dir = path.into();
        self
    }

    pub fn with_config_dir(mut self, path: Option<PathBuf>) -> Self {
        self.config_dir = path;
        self
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_path(path)
        } else {
            normalize_path(&self.current_dir.join(path))
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files
            .get(&self.resolve(path))
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }

    fn exists(&self, path: &Path) -> bool {
        let resolved = self.resolve(path);
        self.files.contains_key(&resolved) || self.dirs.contains(&resolved)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&self.resolve(path))
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn config_dir(&self) -> Option<PathBuf> {
        self.config_dir.clone()
    }

    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        if self.exists(path) {
            Ok(self.resolve(path))
        } else {
            Err(Error::new(ErrorKind::NotFound, "file not found"))
        }
    }
}

pub fn normalize_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy().replace('\\', "/");
    let mut components = Vec::new();
    for part in path_str.split('/') {
        match part {
            ".." => {
                components.pop();
            }
            "." | "" => {}
            _ => components.push(part),
        }
    }
    let normalized = if path_str.starts_with('/') {
        format!("/{}", components.join("/"))
    } else {
        components.join("/")
    };
    PathBuf::from(normalized)
}
