//! Loaded documentation pages.
//!
//! A [`Document`] is built once per build pass from a single content file and
//! never mutated afterwards. Everything downstream (categories, navigation,
//! manifests) holds it through `Arc<Document>`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::reading_time::ReadingTime;
use crate::toc::HeadingIndex;

/// Which content set a document belongs to.
///
/// Secondary documents live under a slug prefix so they never collide with
/// primary ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSet {
    #[default]
    Primary,
    Secondary,
}

impl ContentSet {
    /// Both content sets, primary first.
    pub const ALL: [Self; 2] = [Self::Primary, Self::Secondary];

    /// Resolve the set from a declared `type` value.
    ///
    /// Only an exact match with `secondary_type` selects the secondary set.
    #[must_use]
    pub fn resolve(declared: Option<&str>, secondary_type: &str) -> Self {
        match declared {
            Some(t) if t.trim() == secondary_type => Self::Secondary,
            _ => Self::Primary,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for ContentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared and derived metadata for a document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DocumentMeta {
    /// Final slug, including the secondary prefix where applicable.
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Position within the category; `None` sorts last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    pub content_set: ContentSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Two-level heading index of the body.
    pub headings: HeadingIndex,
    pub reading_time: ReadingTime,
    /// Front matter keys outside the known set.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A single documentation page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    /// Unique key in the documents map (same as `meta.slug`).
    pub slug: String,
    /// Path of the content file relative to the source directory.
    pub source: PathBuf,
    /// Body text after the front matter, unrendered.
    #[serde(skip)]
    pub body: String,
    pub meta: DocumentMeta,
}

impl Document {
    /// Public route of the document under `route_prefix`.
    ///
    /// ```
    /// # use dox_site::{ContentSet, Document, DocumentMeta, extract_headings, estimate};
    /// # let meta = DocumentMeta {
    /// #     slug: "events/send".to_owned(), title: "Send".to_owned(), category: None,
    /// #     order: None, content_set: ContentSet::Primary, image: None, description: None,
    /// #     headings: extract_headings(""), reading_time: estimate("", 200), extra: Default::default(),
    /// # };
    /// # let doc = Document { slug: meta.slug.clone(), source: "send.md".into(), body: String::new(), meta };
    /// assert_eq!(doc.route("/docs"), "/docs/events/send");
    /// ```
    #[must_use]
    pub fn route(&self, route_prefix: &str) -> String {
        format!("{}/{}", route_prefix.trim_end_matches('/'), self.slug)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.meta.title
    }

    #[must_use]
    pub fn content_set(&self) -> ContentSet {
        self.meta.content_set
    }
}
