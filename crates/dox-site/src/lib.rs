//! Documentation corpus loading for dox.
//!
//! This crate provides:
//! - [`DocumentLoader`]: reads content files from a [`Storage`](dox_storage::Storage)
//!   backend, parses front matter and validates the corpus
//! - [`DocsIndex`]: slug map, route list, category tree and navigation
//! - [`BuildCache`]: per-profile memoization of index builds
//! - Helpers used along the way: [`slugify`], [`extract_headings`],
//!   [`split_front_matter`] and [`estimate`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use dox_site::{BuildCache, BuildProfile, ContentSet, DocumentLoader, LoaderConfig};
//! use dox_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let loader = DocumentLoader::new(storage, LoaderConfig::default());
//! let cache = BuildCache::new(loader, BuildProfile::Production);
//!
//! let index = cache.index()?;
//! let nav = index.navigation(ContentSet::Primary);
//! let page = index.require("functions")?;
//! # Ok(())
//! # }
//! ```

mod build_cache;
mod category;
mod document;
mod frontmatter;
mod index;
mod loader;
mod reading_time;
mod slug;
mod toc;

pub use build_cache::{BuildCache, BuildProfile};
pub use category::{Category, CategoryKind, CategoryTree, FALLBACK_ORDER, build_categories};
pub use document::{ContentSet, Document, DocumentMeta};
pub use frontmatter::{FrontMatter, FrontMatterError, split_front_matter};
pub use index::{DocsIndex, Manifest, ManifestEntry, NavCategory, NavLink, NotFound};
pub use loader::{
    ContentError, ContentErrorKind, DocumentLoader, LoadError, LoadedDocuments, LoaderConfig,
};
pub use reading_time::{DEFAULT_WORDS_PER_MINUTE, ReadingTime, estimate};
pub use slug::slugify;
pub use toc::{Heading, HeadingIndex, SubHeading, extract_headings};
