//! Memoized index builds.
//!
//! [`BuildCache`] owns a [`DocumentLoader`] and hands out the current
//! [`DocsIndex`] snapshot:
//!
//! - [`BuildProfile::Production`] builds once, on the first successful call,
//!   and returns the same `Arc` afterwards
//! - [`BuildProfile::Development`] rebuilds on every call so edits show up
//!   immediately
//!
//! Failed builds are never memoized; the next call tries again.
//!
//! # Thread Safety
//!
//! `BuildCache` is `Send + Sync`. A `Mutex<()>` serializes builds so
//! concurrent first callers in production share a single build, and an
//! `RwLock<Option<Arc<DocsIndex>>>` holds the snapshot for cheap reads.

use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;

use crate::index::DocsIndex;
use crate::loader::{DocumentLoader, LoadError};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// When to rebuild the index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildProfile {
    /// Build once per process.
    #[default]
    Production,
    /// Rebuild on every request.
    Development,
}

/// Per-profile memoization of [`DocsIndex`] builds.
pub struct BuildCache {
    loader: DocumentLoader,
    profile: BuildProfile,
    /// Serializes builds.
    build_lock: Mutex<()>,
    /// Last successful production build.
    current: RwLock<Option<Arc<DocsIndex>>>,
}

impl BuildCache {
    #[must_use]
    pub fn new(loader: DocumentLoader, profile: BuildProfile) -> Self {
        Self {
            loader,
            profile,
            build_lock: Mutex::new(()),
            current: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn profile(&self) -> BuildProfile {
        self.profile
    }

    #[must_use]
    pub fn loader(&self) -> &DocumentLoader {
        &self.loader
    }

    /// Current index, building it if the profile requires.
    ///
    /// # Errors
    ///
    /// Propagates any [`LoadError`] from the build. Nothing is cached on
    /// failure.
    pub fn index(&self) -> Result<Arc<DocsIndex>, LoadError> {
        if self.profile == BuildProfile::Development {
            let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);
            return self.build().map(Arc::new);
        }

        if let Some(index) = self.cached() {
            return Ok(index);
        }

        let _guard = self.build_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished while we waited.
        if let Some(index) = self.cached() {
            return Ok(index);
        }

        let index = Arc::new(self.build()?);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&index));
        Ok(index)
    }

    fn cached(&self) -> Option<Arc<DocsIndex>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn build(&self) -> Result<DocsIndex, LoadError> {
        let start = Instant::now();

        let load_start = Instant::now();
        let loaded = self.loader.load()?;
        let load_ms = elapsed_ms(load_start);

        let index_start = Instant::now();
        let index = DocsIndex::new(loaded, &self.loader.config().route_prefix);
        let index_ms = elapsed_ms(index_start);

        tracing::info!(
            profile = ?self.profile,
            document_count = index.len(),
            category_count = index.category_tree().len(),
            load_ms,
            index_ms,
            elapsed_ms = elapsed_ms(start),
            "Docs index built"
        );

        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use dox_storage::{MockStorage, SourceFile, Storage, StorageError};

    use super::*;
    use crate::loader::LoaderConfig;

    static_assertions::assert_impl_all!(BuildCache: Send, Sync);

    /// Storage wrapper counting scans.
    struct CountingStorage {
        inner: MockStorage,
        scans: Arc<AtomicUsize>,
    }

    impl Storage for CountingStorage {
        fn scan(&self) -> Result<Vec<SourceFile>, StorageError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            self.inner.scan()
        }

        fn read(&self, path: &Path) -> Result<String, StorageError> {
            self.inner.read(path)
        }

        fn exists(&self, path: &Path) -> bool {
            self.inner.exists(path)
        }
    }

    fn cache(storage: MockStorage, profile: BuildProfile) -> (BuildCache, Arc<AtomicUsize>) {
        let scans = Arc::new(AtomicUsize::new(0));
        let storage = CountingStorage {
            inner: storage,
            scans: Arc::clone(&scans),
        };
        let loader = DocumentLoader::new(Arc::new(storage), LoaderConfig::default());
        (BuildCache::new(loader, profile), scans)
    }

    fn corpus() -> MockStorage {
        MockStorage::new()
            .with_file("a.md", "---\nslug: a\ntitle: A\ncategory: Guides\norder: 1\n---\n")
            .with_file("b.md", "---\nslug: b\ntitle: B\ncategory: Guides\norder: 0\n---\n")
    }

    #[test]
    fn test_production_builds_once() {
        let (cache, scans) = cache(corpus(), BuildProfile::Production);

        let first = cache.index().unwrap();
        let second = cache.index().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(scans.load(Ordering::SeqCst), 1);
        assert_eq!(first.slugs().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_development_rebuilds_every_call() {
        let (cache, scans) = cache(corpus(), BuildProfile::Development);

        let first = cache.index().unwrap();
        let second = cache.index().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_not_memoized() {
        let storage = MockStorage::new().with_unreadable("locked.md");
        let (cache, scans) = cache(storage, BuildProfile::Production);

        assert!(matches!(cache.index(), Err(LoadError::Storage(_))));
        assert!(matches!(cache.index(), Err(LoadError::Storage(_))));
        assert_eq!(scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_calls_share_build() {
        let (cache, scans) = cache(corpus(), BuildProfile::Production);

        let indexes: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| cache.index().unwrap())).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(scans.load(Ordering::SeqCst), 1);
        assert!(indexes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_index_contents() {
        let (cache, _) = cache(corpus(), BuildProfile::Production);
        let index = cache.index().unwrap();

        assert_eq!(index.routes(), ["/docs/a", "/docs/b"]);
        let guides = &index.navigation(crate::ContentSet::Primary)[0];
        assert_eq!(guides.title, "Guides");
        assert_eq!(guides.links[0].href, "/docs/b");
    }
}
