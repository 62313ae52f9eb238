//! Read-only documentation index.
//!
//! [`DocsIndex`] bundles the flat slug map, the route list and the category
//! tree produced by one build pass. It is what page generation and the CLI
//! query; nothing in it changes after construction.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::category::{Category, CategoryTree, build_categories};
use crate::document::{ContentSet, Document, DocumentMeta};
use crate::loader::LoadedDocuments;

/// Requested slug is not in the index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document not found: {slug}")]
pub struct NotFound {
    pub slug: String,
}

/// Navigation link to a single document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub href: String,
}

/// Navigation group rendered by the site layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavCategory {
    pub title: String,
    pub order: u32,
    pub links: Vec<NavLink>,
}

/// One document in the [`Manifest`].
#[derive(Debug, Serialize)]
pub struct ManifestEntry<'a> {
    pub route: String,
    pub source: &'a Path,
    #[serde(flatten)]
    pub meta: &'a DocumentMeta,
}

/// JSON summary of an index.
#[derive(Debug, Serialize)]
pub struct Manifest<'a> {
    pub route_prefix: &'a str,
    pub document_count: usize,
    pub routes: &'a [String],
    pub documents: Vec<ManifestEntry<'a>>,
    pub navigation: BTreeMap<ContentSet, Vec<NavCategory>>,
}

/// Documents, routes and categories from one build pass.
#[derive(Debug)]
pub struct DocsIndex {
    documents: BTreeMap<String, Arc<Document>>,
    routes: Vec<String>,
    categories: CategoryTree,
    route_prefix: String,
}

impl DocsIndex {
    /// Build the index from loaded documents.
    #[must_use]
    pub fn new(loaded: LoadedDocuments, route_prefix: &str) -> Self {
        let LoadedDocuments { documents, routes } = loaded;
        let categories = build_categories(documents.values());
        Self {
            documents,
            routes,
            categories,
            route_prefix: route_prefix.trim_end_matches('/').to_owned(),
        }
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&Arc<Document>> {
        self.documents.get(slug)
    }

    /// Like [`DocsIndex::get`], but a missing slug is an error.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] when no document has `slug`.
    pub fn require(&self, slug: &str) -> Result<&Arc<Document>, NotFound> {
        self.get(slug).ok_or_else(|| NotFound {
            slug: slug.to_owned(),
        })
    }

    /// Every public route, in source path order.
    #[must_use]
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    /// Every slug, sorted.
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    #[must_use]
    pub fn categories(&self, set: ContentSet) -> &[Category] {
        self.categories.categories(set)
    }

    #[must_use]
    pub fn category_tree(&self) -> &CategoryTree {
        &self.categories
    }

    /// Navigation tree for one content set, in display order.
    #[must_use]
    pub fn navigation(&self, set: ContentSet) -> Vec<NavCategory> {
        self.categories(set)
            .iter()
            .map(|category| NavCategory {
                title: category.title.clone(),
                order: category.order,
                links: category
                    .pages
                    .iter()
                    .map(|page| NavLink {
                        title: page.meta.title.clone(),
                        href: page.route(&self.route_prefix),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Serializable summary of every document and both navigation trees.
    #[must_use]
    pub fn manifest(&self) -> Manifest<'_> {
        Manifest {
            route_prefix: &self.route_prefix,
            document_count: self.documents.len(),
            routes: &self.routes,
            documents: self
                .documents
                .values()
                .map(|doc| ManifestEntry {
                    route: doc.route(&self.route_prefix),
                    source: &doc.source,
                    meta: &doc.meta,
                })
                .collect(),
            navigation: ContentSet::ALL
                .into_iter()
                .map(|set| (set, self.navigation(set)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_support::{doc, doc_in};
    use crate::loader::{DocumentLoader, LoaderConfig};
    use dox_storage::MockStorage;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(DocsIndex: Send, Sync);

    fn index(docs: Vec<Document>) -> DocsIndex {
        let mut loaded = LoadedDocuments::default();
        for d in docs {
            loaded.routes.push(d.route("/docs"));
            loaded.documents.insert(d.slug.clone(), Arc::new(d));
        }
        DocsIndex::new(loaded, "/docs")
    }

    #[test]
    fn test_get_and_require() {
        let idx = index(vec![doc("intro", None, None)]);

        assert_eq!(idx.get("intro").unwrap().slug, "intro");
        assert!(idx.get("missing").is_none());
        assert_eq!(
            idx.require("missing").unwrap_err(),
            NotFound {
                slug: "missing".to_owned()
            }
        );
        assert_eq!(
            idx.require("missing").unwrap_err().to_string(),
            "document not found: missing"
        );
    }

    #[test]
    fn test_routes_and_slugs() {
        let idx = index(vec![doc("b", None, None), doc("a", None, None)]);

        assert_eq!(idx.routes(), ["/docs/b", "/docs/a"]);
        assert_eq!(idx.slugs().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn test_navigation() {
        let idx = index(vec![
            doc("a", Some("Guides"), Some(1.0)),
            doc("b", Some("Guides"), Some(0.0)),
            doc("s", Some("Getting started"), None),
            doc_in(ContentSet::Secondary, "cli/dev", Some("Reference"), None),
        ]);

        assert_eq!(
            idx.navigation(ContentSet::Primary),
            vec![
                NavCategory {
                    title: "Getting started".to_owned(),
                    order: 0,
                    links: vec![NavLink {
                        title: "S".to_owned(),
                        href: "/docs/s".to_owned(),
                    }],
                },
                NavCategory {
                    title: "Guides".to_owned(),
                    order: 4,
                    links: vec![
                        NavLink {
                            title: "B".to_owned(),
                            href: "/docs/b".to_owned(),
                        },
                        NavLink {
                            title: "A".to_owned(),
                            href: "/docs/a".to_owned(),
                        },
                    ],
                },
            ]
        );
        assert_eq!(idx.navigation(ContentSet::Secondary)[0].links[0].href, "/docs/cli/dev");
    }

    #[test]
    fn test_categories_reflect_documents() {
        let idx = index(vec![doc("a", Some("Guides"), None), doc("b", None, None)]);

        let guides = &idx.categories(ContentSet::Primary)[0];
        assert_eq!(guides.pages.len(), 1);
        assert!(Arc::ptr_eq(&guides.pages[0], idx.get("a").unwrap()));
        assert!(idx.categories(ContentSet::Secondary).is_empty());
    }

    #[test]
    fn test_manifest() {
        let idx = index(vec![doc("a", Some("Guides"), Some(1.0))]);
        let json = serde_json::to_value(idx.manifest()).unwrap();

        assert_eq!(json["route_prefix"], "/docs");
        assert_eq!(json["document_count"], 1);
        assert_eq!(json["routes"], serde_json::json!(["/docs/a"]));
        assert_eq!(json["documents"][0]["route"], "/docs/a");
        assert_eq!(json["documents"][0]["slug"], "a");
        assert_eq!(json["documents"][0]["category"], "Guides");
        assert_eq!(json["documents"][0]["reading_time"]["text"], "1 min read");
        assert_eq!(json["navigation"]["primary"][0]["title"], "Guides");
        assert_eq!(json["navigation"]["secondary"], serde_json::json!([]));
    }

    #[test]
    fn test_manifest_nests_extra_front_matter() {
        let mut a = doc("a", None, None);
        a.meta
            .extra
            .insert("route".to_owned(), serde_json::json!("/elsewhere"));
        a.meta
            .extra
            .insert("source".to_owned(), serde_json::json!("other.md"));
        let idx = index(vec![a]);

        let json = serde_json::to_value(idx.manifest()).unwrap();
        let entry = &json["documents"][0];

        assert_eq!(entry["route"], "/docs/a");
        assert_eq!(entry["source"], "a.md");
        assert_eq!(entry["extra"]["route"], "/elsewhere");
        assert_eq!(entry["extra"]["source"], "other.md");
    }

    #[test]
    fn test_hidden_document_absent_from_every_view() {
        let storage = MockStorage::new()
            .with_file("a.md", "---\nslug: a\ntitle: A\ncategory: Guides\n---\n")
            .with_file(
                "hidden.md",
                "---\nslug: hidden-one\ntitle: Hidden\ncategory: Guides\nhide: true\n---\n",
            );
        let loader = DocumentLoader::new(Arc::new(storage), LoaderConfig::default());
        let idx = DocsIndex::new(loader.load().unwrap(), "/docs");

        assert!(idx.get("hidden-one").is_none());
        assert!(!idx.slugs().any(|slug| slug == "hidden-one"));
        assert_eq!(idx.routes(), ["/docs/a"]);
        for set in ContentSet::ALL {
            for category in idx.categories(set) {
                assert!(category.pages.iter().all(|page| page.slug != "hidden-one"));
            }
        }
        assert_eq!(idx.categories(ContentSet::Primary)[0].pages.len(), 1);
    }
}
