//! File access under the configured files root.
//!
//! Every connection gets a clone of the same `FileStore`; the root path is
//! shared and never changes after startup.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file not found")]
    NotFound,
    /// The name would escape the files root, or is empty.
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read/write access to files under a single directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Arc<Path>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        Self {
            root: Arc::from(root),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins `name` onto the root.
    ///
    /// Rejects empty names, absolute names, and any name with a `..`
    /// component.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, FileError> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if name.is_empty() || escapes {
            return Err(FileError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(relative))
    }

    /// Reads a whole file.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(name)?;

        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FileError::NotFound),
            Err(e) => Err(FileError::Io(e)),
        }
    }

    /// Writes `contents`, creating the file or truncating an existing one.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, contents).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_traversal() {
        let store = FileStore::new("/srv/files");

        for name in ["../etc/passwd", "a/../../b", "/etc/passwd", ""] {
            assert!(
                matches!(store.resolve(name), Err(FileError::InvalidName(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn resolve_joins_nested_names() {
        let store = FileStore::new("/srv/files");

        assert_eq!(
            store.resolve("dir/a.txt").unwrap(),
            PathBuf::from("/srv/files/dir/a.txt")
        );
    }
}
