//! Filesystem storage implementation for the dox documentation loader.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](dox_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning filtered by glob patterns
//! - Reading content files relative to the source directory
//! - Rejecting paths that escape the source directory
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use dox_storage::Storage;
//! use dox_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for file in storage.scan()? {
//!     println!("{}", file.path.display());
//! }
//! ```

mod scanner;

use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;

use dox_storage::{SourceFile, Storage, StorageError, StorageErrorKind};
use scanner::Scanner;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default content patterns.
const DEFAULT_PATTERNS: [&str; 2] = ["**/*.md", "**/*.mdx"];

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for files matching the configured
/// glob patterns. Hidden files and directories (leading `.`) are skipped.
pub struct FsStorage {
    /// Root directory for content files.
    source_dir: PathBuf,
    /// Scanner for content discovery.
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage matching `.md` and `.mdx` files.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        let patterns = DEFAULT_PATTERNS
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .collect();
        Self {
            scanner: Scanner::new(source_dir.clone(), patterns),
            source_dir,
        }
    }

    /// Create a new filesystem storage with custom glob patterns.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory containing content files
    /// * `patterns` - Glob patterns relative to `source_dir` (e.g., `["**/*.md"]`)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any pattern is not a valid glob.
    pub fn with_patterns(source_dir: PathBuf, patterns: &[String]) -> Result<Self, StorageError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    StorageError::new(StorageErrorKind::Other)
                        .with_backend(BACKEND)
                        .with_source(e)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scanner: Scanner::new(source_dir.clone(), patterns),
            source_dir,
        })
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Validate that a relative path stays inside the source directory.
    ///
    /// Rejects absolute paths and paths containing `..`.
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes || path.as_os_str().is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<SourceFile>, StorageError> {
        if !self.source_dir.exists() {
            tracing::warn!(dir = %self.source_dir.display(), "Source directory does not exist");
        }

        let files: Vec<SourceFile> = self.scanner.scan().into_iter().map(SourceFile::new).collect();
        tracing::debug!(file_count = files.len(), "Filesystem scan completed");
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        fs::read_to_string(self.source_dir.join(path))
            .map_err(|e| StorageError::io(e, path).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        Self::validate_path(path).is_ok() && self.source_dir.join(path).is_file()
    }
}
