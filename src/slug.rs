//! Slug normalization for topic identifiers.

use unicode_normalization::UnicodeNormalization;

/// Normalize a title into a URL-safe slug.
///
/// NFC-normalizes and lowercases the input, keeps alphanumeric characters,
/// and collapses runs of whitespace, underscores, and hyphens into a single
/// hyphen. Other characters are dropped without forcing a separator. The
/// result carries no leading, trailing, or duplicate hyphens; all-symbol
/// input yields an empty slug.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.nfc().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }

    slug
}
