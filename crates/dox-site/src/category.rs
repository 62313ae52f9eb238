//! Category grouping for navigation.
//!
//! Documents declare a free-form `category` in their front matter. Known
//! category names map to a [`CategoryKind`] with a fixed display order;
//! anything else falls back to [`CategoryKind::Other`], which sorts after
//! every known category.
//!
//! Categories are derived from the flat document map in one pass and never
//! patched afterwards, so they always agree with it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::document::{ContentSet, Document};

/// Display order for categories without a known kind.
pub const FALLBACK_ORDER: u32 = 100;

/// Known documentation categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryKind {
    GettingStarted,
    Functions,
    Events,
    Deploying,
    Guides,
    Platform,
    Reference,
    /// Any category name not listed above.
    Other,
}

impl CategoryKind {
    /// Map a declared category name to its kind.
    ///
    /// Matching ignores case and surrounding whitespace. Unknown names
    /// return [`CategoryKind::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "getting started" | "quick start" => Self::GettingStarted,
            "writing functions" | "functions" => Self::Functions,
            "sending events" | "events" => Self::Events,
            "deploying" | "deploy" => Self::Deploying,
            "guides" => Self::Guides,
            "platform" => Self::Platform,
            "reference" => Self::Reference,
            _ => Self::Other,
        }
    }

    /// Display order; lower sorts first.
    #[must_use]
    pub fn order(self) -> u32 {
        match self {
            Self::GettingStarted => 0,
            Self::Functions => 1,
            Self::Events => 2,
            Self::Deploying => 3,
            Self::Guides => 4,
            Self::Platform => 5,
            Self::Reference => 6,
            Self::Other => FALLBACK_ORDER,
        }
    }
}

/// A navigation category and its pages.
#[derive(Clone, Debug, Serialize)]
pub struct Category {
    /// Declared category name, trimmed.
    pub title: String,
    pub kind: CategoryKind,
    pub order: u32,
    /// Member documents, sorted by page order.
    #[serde(serialize_with = "serialize_slugs")]
    pub pages: Vec<Arc<Document>>,
}

fn serialize_slugs<S: serde::Serializer>(
    pages: &[Arc<Document>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(pages.iter().map(|p| p.slug.as_str()))
}

/// Categories of every content set, sorted for display.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryTree {
    sets: BTreeMap<ContentSet, Vec<Category>>,
}

impl CategoryTree {
    /// Categories of one content set in display order.
    #[must_use]
    pub fn categories(&self, set: ContentSet) -> &[Category] {
        self.sets.get(&set).map_or(&[], Vec::as_slice)
    }

    /// Look up a category by its declared title.
    #[must_use]
    pub fn get(&self, set: ContentSet, title: &str) -> Option<&Category> {
        self.categories(set).iter().find(|c| c.title == title)
    }

    /// Total number of categories across all sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Page order: declared order ascending, undeclared last, ties by slug.
fn compare_pages(a: &Document, b: &Document) -> Ordering {
    match (a.meta.order, b.meta.order) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.slug.cmp(&b.slug))
}

/// Group documents into categories per content set.
///
/// Documents without a category are left out of the tree.
#[must_use]
pub fn build_categories<'a, I>(documents: I) -> CategoryTree
where
    I: IntoIterator<Item = &'a Arc<Document>>,
{
    let mut groups: BTreeMap<(ContentSet, String), Vec<Arc<Document>>> = BTreeMap::new();

    for doc in documents {
        let Some(category) = doc.meta.category.as_deref().map(str::trim) else {
            tracing::debug!(slug = %doc.slug, "Document has no category");
            continue;
        };
        groups
            .entry((doc.meta.content_set, category.to_owned()))
            .or_default()
            .push(Arc::clone(doc));
    }

    let mut tree = CategoryTree::default();
    for ((set, title), mut pages) in groups {
        pages.sort_by(|a, b| compare_pages(a, b));
        let kind = CategoryKind::from_name(&title);
        tree.sets.entry(set).or_default().push(Category {
            title,
            kind,
            order: kind.order(),
            pages,
        });
    }

    for categories in tree.sets.values_mut() {
        categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
    }

    tree
}
