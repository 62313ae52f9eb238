//! Content discovery by filesystem walking.
//!
//! The scanner only identifies files; it never reads them. `FsStorage`
//! hands the resulting relative paths to the loader, which reads each one.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

/// Discovers content files by walking the filesystem.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Root directory to scan
    /// * `patterns` - Glob patterns a relative path must match (any of)
    pub fn new(source_dir: PathBuf, patterns: Vec<Pattern>) -> Self {
        Self {
            source_dir,
            patterns,
        }
    }

    /// Scan the filesystem and return matching relative paths, sorted.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, "", &mut found);
        }
        found.sort();
        found
    }

    /// Recursively collect matching files below `dir_path`.
    ///
    /// `rel_prefix` is the `/`-joined path of `dir_path` relative to the
    /// source directory (empty at the root).
    fn scan_directory(&self, dir_path: &Path, rel_prefix: &str, found: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::debug!(dir = %dir_path.display(), "Skipping unreadable directory");
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let rel_path = if rel_prefix.is_empty() {
                name
            } else {
                format!("{rel_prefix}/{name}")
            };

            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                self.scan_directory(&entry.path(), &rel_path, found);
            } else if file_type.is_file() && self.matches(&rel_path) {
                found.push(PathBuf::from(rel_path));
            }
        }
    }

    fn matches(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(rel_path))
    }
}
