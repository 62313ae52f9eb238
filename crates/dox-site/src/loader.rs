//! Document loading from storage.
//!
//! [`DocumentLoader`] turns every content file exposed by a [`Storage`]
//! backend into a [`Document`]:
//!
//! 1. Scan storage and sort source paths for deterministic output
//! 2. Read each file and split its front matter from the body
//! 3. Skip documents declaring `hide: true`
//! 4. Validate required fields and slug uniqueness
//! 5. Derive the heading index and reading time from the body
//!
//! Validation is exhaustive: every violation across the corpus is collected
//! into [`LoadError::Invalid`] rather than stopping at the first one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dox_storage::{Storage, StorageError, StorageErrorKind};

use crate::document::{ContentSet, Document, DocumentMeta};
use crate::frontmatter::{FrontMatter, FrontMatterError, split_front_matter};
use crate::reading_time::{DEFAULT_WORDS_PER_MINUTE, estimate};
use crate::toc::extract_headings;

/// Configuration for [`DocumentLoader`].
#[derive(Clone, Debug)]
pub struct LoaderConfig {
    /// URL prefix for document routes (e.g., `/docs`).
    pub route_prefix: String,
    /// Front matter `type` value selecting the secondary content set.
    pub secondary_type: String,
    /// Slug prefix applied to secondary documents.
    pub secondary_prefix: String,
    /// Reading speed for reading time estimates.
    pub words_per_minute: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            route_prefix: "/docs".to_owned(),
            secondary_type: "cli".to_owned(),
            secondary_prefix: "cli/".to_owned(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Why a content file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ContentErrorKind {
    /// The file could not be decoded as UTF-8 text.
    #[error("unreadable content: {0}")]
    Unreadable(#[source] StorageError),
    #[error("missing front matter")]
    MissingFrontMatter,
    #[error("malformed front matter: {0}")]
    Malformed(#[source] FrontMatterError),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("slug is empty")]
    EmptySlug,
    #[error("duplicate slug `{slug}` (first defined in {})", first.display())]
    DuplicateSlug {
        /// The clashing slug, after prefixing.
        slug: String,
        /// Source of the document that claimed the slug first.
        first: PathBuf,
    },
}

/// A validation failure tied to one source file.
#[derive(Debug)]
pub struct ContentError {
    /// Path of the offending file relative to the source directory.
    pub source: PathBuf,
    pub kind: ContentErrorKind,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.display(), self.kind)
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Error loading documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The storage backend failed to scan or read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// One or more content files failed validation.
    #[error("{}", invalid_summary(.0))]
    Invalid(Vec<ContentError>),
}

impl LoadError {
    /// Validation failures, if this is [`LoadError::Invalid`].
    #[must_use]
    pub fn content_errors(&self) -> &[ContentError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::Storage(_) => &[],
        }
    }
}

fn invalid_summary(errors: &[ContentError]) -> String {
    let count = errors
        .iter()
        .map(|e| e.source.as_path())
        .collect::<BTreeSet<_>>()
        .len();
    let noun = if count == 1 { "file" } else { "files" };
    format!("{count} content {noun} failed validation")
}

/// Output of a successful load.
#[derive(Clone, Debug, Default)]
pub struct LoadedDocuments {
    /// Documents keyed by slug.
    pub documents: BTreeMap<String, Arc<Document>>,
    /// Public routes, in source path order.
    pub routes: Vec<String>,
}

/// Loads documents from a storage backend.
pub struct DocumentLoader {
    storage: Arc<dyn Storage>,
    config: LoaderConfig,
}

impl DocumentLoader {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: LoaderConfig) -> Self {
        Self { storage, config }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load and validate every document in storage.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Storage`] if scanning or reading fails, and
    /// [`LoadError::Invalid`] listing every rejected file, sorted by source
    /// path, if any visible document fails validation.
    pub fn load(&self) -> Result<LoadedDocuments, LoadError> {
        let mut files = self.storage.scan()?;
        files.sort();

        let mut loaded = LoadedDocuments::default();
        let mut errors = Vec::new();
        let mut hidden = 0usize;

        for file in &files {
            let content = match self.storage.read(&file.path) {
                Ok(content) => content,
                Err(err) if err.kind == StorageErrorKind::InvalidData => {
                    errors.push(ContentError {
                        source: file.path.clone(),
                        kind: ContentErrorKind::Unreadable(err),
                    });
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            let document = match self.parse(&file.path, &content) {
                Ok(Some(document)) => document,
                Ok(None) => {
                    hidden += 1;
                    tracing::debug!(path = %file.path.display(), "Skipping hidden document");
                    continue;
                }
                Err(kinds) => {
                    errors.extend(kinds.into_iter().map(|kind| ContentError {
                        source: file.path.clone(),
                        kind,
                    }));
                    continue;
                }
            };

            if let Some(existing) = loaded.documents.get(&document.slug) {
                errors.push(ContentError {
                    source: file.path.clone(),
                    kind: ContentErrorKind::DuplicateSlug {
                        slug: document.slug.clone(),
                        first: existing.source.clone(),
                    },
                });
                continue;
            }

            loaded
                .routes
                .push(document.route(&self.config.route_prefix));
            loaded
                .documents
                .insert(document.slug.clone(), Arc::new(document));
        }

        if !errors.is_empty() {
            // Stable, so violations within one file keep their field order.
            errors.sort_by(|a, b| a.source.cmp(&b.source));
            return Err(LoadError::Invalid(errors));
        }

        if loaded.documents.is_empty() {
            tracing::warn!(file_count = files.len(), "No documents loaded");
        }
        tracing::debug!(
            file_count = files.len(),
            document_count = loaded.documents.len(),
            hidden,
            "Documents loaded"
        );

        Ok(loaded)
    }

    /// Build a document from one file. `Ok(None)` means the file is hidden.
    ///
    /// On failure, returns every violation found in the file.
    fn parse(
        &self,
        source: &Path,
        content: &str,
    ) -> Result<Option<Document>, Vec<ContentErrorKind>> {
        let (front_matter, body) =
            split_front_matter(content).map_err(|e| vec![ContentErrorKind::Malformed(e)])?;
        let Some(fm) = front_matter else {
            return Err(vec![ContentErrorKind::MissingFrontMatter]);
        };
        if fm.hide {
            return Ok(None);
        }

        let FrontMatter {
            slug,
            title,
            category,
            order,
            image,
            description,
            content_type,
            extra,
            ..
        } = fm;

        let slug = slug.as_deref().map(|s| s.trim().trim_matches('/'));
        let title = non_empty(title);

        let mut violations = Vec::new();
        match slug {
            None => violations.push(ContentErrorKind::MissingField("slug")),
            Some("") => violations.push(ContentErrorKind::EmptySlug),
            Some(_) => {}
        }
        if title.is_none() {
            violations.push(ContentErrorKind::MissingField("title"));
        }
        let (Some(slug), Some(title)) = (slug.filter(|s| !s.is_empty()), title) else {
            return Err(violations);
        };

        let content_set = ContentSet::resolve(content_type.as_deref(), &self.config.secondary_type);
        let slug = self.apply_prefix(content_set, slug);

        Ok(Some(Document {
            source: source.to_path_buf(),
            body: body.to_owned(),
            meta: DocumentMeta {
                slug: slug.clone(),
                title,
                category: non_empty(category),
                order,
                content_set,
                image,
                description,
                headings: extract_headings(body),
                reading_time: estimate(body, self.config.words_per_minute),
                extra,
            },
            slug,
        }))
    }

    fn apply_prefix(&self, set: ContentSet, slug: &str) -> String {
        let prefix = &self.config.secondary_prefix;
        match set {
            ContentSet::Secondary if !slug.starts_with(prefix.as_str()) => {
                format!("{prefix}{slug}")
            }
            _ => slug.to_owned(),
        }
    }
}

/// Trim a string field, treating blank values as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
