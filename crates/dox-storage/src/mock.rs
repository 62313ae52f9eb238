//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::storage::{SourceFile, Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores file contents in memory. Use the builder methods to configure
/// the mock with test data.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use dox_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guides/a.md", "---\nslug: a\ntitle: A\n---\n# Intro");
///
/// let files = storage.scan().unwrap();
/// let content = storage.read(Path::new("guides/a.md")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<PathBuf, String>>,
    read_errors: RwLock<BTreeMap<PathBuf, StorageErrorKind>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), content.into());
        self
    }

    /// Add a file that is listed by `scan()` but fails on `read()` with
    /// [`StorageErrorKind::PermissionDenied`].
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<PathBuf>) -> Self {
        self.with_read_error(path, StorageErrorKind::PermissionDenied)
    }

    /// Add a file that is listed by `scan()` but fails on `read()` with `kind`.
    ///
    /// [`StorageErrorKind::InvalidData`] stands in for a file that is not
    /// valid UTF-8.
    #[must_use]
    pub fn with_read_error(self, path: impl Into<PathBuf>, kind: StorageErrorKind) -> Self {
        self.read_errors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), kind);
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<SourceFile>, StorageError> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        let read_errors = self.read_errors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(files
            .keys()
            .chain(read_errors.keys())
            .map(SourceFile::new)
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let read_errors = self.read_errors.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(&kind) = read_errors.get(path) {
            return Err(StorageError::new(kind).with_path(path).with_backend("Mock"));
        }
        self.files
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend("Mock"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap_or_else(PoisonError::into_inner).contains_key(path)
    }
}
