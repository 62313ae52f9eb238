//! Heading text to URL-safe identifier.

/// Convert arbitrary heading text to a lowercase, hyphen-separated slug.
///
/// Only ASCII letters, digits, spaces, `:`, `&` and `-` survive; every other
/// character is dropped. Spaces, `:` and `&` act as separators and runs of
/// separators collapse into a single `-`. Separators at either edge are kept,
/// so `"Step 1: "` becomes `"step-1-"`. The result is usable both as an HTML
/// anchor and as a URL path segment.
///
/// Returns an empty string when nothing survives. No uniqueness is enforced.
///
/// # Examples
///
/// ```
/// use dox_site::slugify;
///
/// assert_eq!(slugify("Foo & Bar: Baz"), "foo-bar-baz");
/// assert_eq!(slugify("What's new?"), "whats-new");
/// assert_eq!(slugify("Step 1: "), "step-1-");
/// assert_eq!(slugify("¿?"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if matches!(c, ' ' | ':' | '&' | '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    slug
}
