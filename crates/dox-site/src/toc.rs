//! Table of contents extraction from document bodies.
//!
//! Builds a two-level heading index from the CommonMark event stream:
//!
//! - `# Title` starts a top-level entry
//! - `## Title` becomes a subheading of the most recent top-level entry
//!
//! Only ATX headings count. Code blocks (fenced or indented) never produce
//! headings, and deeper levels (`###` and beyond) and setext headings are
//! ignored. Extraction never fails; content without markers simply produces
//! an empty index.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::slug::slugify;

/// A second-level heading attached to a [`Heading`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubHeading {
    /// Heading text.
    pub title: String,
    /// Anchor slug.
    pub slug: String,
}

/// A top-level heading and its subheadings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Zero-based position among top-level headings.
    pub order: usize,
    /// Heading text.
    pub title: String,
    /// Anchor slug.
    pub slug: String,
    /// Second-level headings, in source order.
    pub subheadings: Vec<SubHeading>,
}

/// Ordered heading index for one document.
///
/// Iterates in source order; [`HeadingIndex::get`] looks entries up by title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadingIndex {
    headings: Vec<Heading>,
}

impl HeadingIndex {
    /// Look up a top-level heading by its title.
    ///
    /// When several headings share a title, the first one wins.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Heading> {
        self.headings.iter().find(|h| h.title == title)
    }

    /// Iterate over top-level headings in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Heading> {
        self.headings.iter()
    }

    /// Number of top-level headings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    /// Whether the document has no top-level headings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }
}

impl<'a> IntoIterator for &'a HeadingIndex {
    type Item = &'a Heading;
    type IntoIter = std::slice::Iter<'a, Heading>;

    fn into_iter(self) -> Self::IntoIter {
        self.headings.iter()
    }
}

/// Heading being collected while walking parser events.
struct OpenHeading {
    level: HeadingLevel,
    title: String,
}

impl OpenHeading {
    /// Start tracking an ATX heading of level 1 or 2.
    ///
    /// Setext headings (underlined with `=` or `-`) do not start with `#` in
    /// the source and are left out.
    fn start(level: HeadingLevel, source: &str) -> Option<Self> {
        let tracked = matches!(level, HeadingLevel::H1 | HeadingLevel::H2)
            && source.trim_start().starts_with('#');
        tracked.then(|| Self {
            level,
            title: String::new(),
        })
    }
}

/// Extract the two-level heading index from a document body.
///
/// # Examples
///
/// ```
/// use dox_site::extract_headings;
///
/// let toc = extract_headings("# Setup\n## Install\n# Usage\n");
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc.get("Setup").unwrap().subheadings[0].slug, "install");
/// ```
#[must_use]
pub fn extract_headings(body: &str) -> HeadingIndex {
    let mut headings: Vec<Heading> = Vec::new();
    let mut open: Option<OpenHeading> = None;

    for (event, range) in Parser::new(body).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                open = OpenHeading::start(level, &body[range]);
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = open.as_mut() {
                    heading.title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some(OpenHeading { level, title }) = open.take() else {
                    continue;
                };
                let title = title.trim();
                if title.is_empty() {
                    continue;
                }

                if level == HeadingLevel::H1 {
                    headings.push(Heading {
                        order: headings.len(),
                        title: title.to_owned(),
                        slug: slugify(title),
                        subheadings: Vec::new(),
                    });
                } else if let Some(parent) = headings.last_mut() {
                    parent.subheadings.push(SubHeading {
                        title: title.to_owned(),
                        slug: slugify(title),
                    });
                }
            }
            _ => {}
        }
    }

    HeadingIndex { headings }
}
