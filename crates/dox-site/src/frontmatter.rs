//! Front matter splitting and parsing.
//!
//! Content files may start with a YAML block fenced by `---` lines:
//!
//! ```markdown
//! ---
//! slug: functions/retries
//! title: Retries
//! category: Writing functions
//! order: 2
//! ---
//!
//! # Retries
//! ```
//!
//! [`split_front_matter`] separates the block from the body and deserializes
//! it into [`FrontMatter`]. Keys outside the known field set are preserved in
//! [`FrontMatter::extra`].

use std::collections::BTreeMap;

use serde::Deserialize;

/// Front matter delimiter line.
const DELIMITER: &str = "---";

/// Error parsing a front matter block.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// Opening `---` found without a matching closing line.
    #[error("front matter opened with `---` but never closed")]
    Unclosed,
    /// The YAML block could not be deserialized.
    #[error("invalid front matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Declared document metadata.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// URL slug, unique within a content set.
    pub slug: Option<String>,
    /// Display title.
    pub title: Option<String>,
    /// Navigation category name.
    pub category: Option<String>,
    /// Position within the category.
    pub order: Option<f64>,
    /// Suppresses the document entirely.
    #[serde(default)]
    pub hide: bool,
    pub image: Option<String>,
    pub description: Option<String>,
    /// Content set name; compared against the configured secondary type.
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    /// Any other keys, kept verbatim.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Split `content` into parsed front matter and the remaining body.
///
/// Returns `(None, content)` when the first line is not a `---` delimiter.
/// An empty block yields [`FrontMatter::default`].
///
/// # Errors
///
/// Returns [`FrontMatterError::Unclosed`] if the closing delimiter is
/// missing and [`FrontMatterError::Yaml`] if the block does not parse.
///
/// # Examples
///
/// ```
/// use dox_site::split_front_matter;
///
/// let (fm, body) = split_front_matter("---\nslug: intro\n---\nHello").unwrap();
/// assert_eq!(fm.unwrap().slug.as_deref(), Some("intro"));
/// assert_eq!(body, "Hello");
/// ```
pub fn split_front_matter(content: &str) -> Result<(Option<FrontMatter>, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some((first, after_open)) = split_line(content) else {
        return Ok((None, content));
    };
    if first.trim_end() != DELIMITER {
        return Ok((None, content));
    }

    let mut rest = after_open;
    let mut yaml_len = 0;
    loop {
        let Some((line, next)) = split_line(rest) else {
            return Err(FrontMatterError::Unclosed);
        };
        if line.trim_end() == DELIMITER {
            let yaml = &after_open[..yaml_len];
            return Ok((Some(parse_yaml(yaml)?), next));
        }
        yaml_len += rest.len() - next.len();
        rest = next;
    }
}

/// Split off the first line, returning `(line, remainder)`.
///
/// The line excludes its terminator; `None` once `text` is exhausted.
fn split_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    Some(match text.find('\n') {
        Some(pos) => (&text[..pos], &text[pos + 1..]),
        None => (text, ""),
    })
}

fn parse_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}
