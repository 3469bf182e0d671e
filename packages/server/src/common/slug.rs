//! URL slug derivation for listings and blog posts.

use chrono::Utc;

/// Derive a URL-safe slug from a display name: lowercase, runs of
/// non-alphanumeric characters collapse to a single hyphen, leading and
/// trailing hyphens are trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Slug for a listing, falling back to a timestamp-based placeholder when the
/// name yields nothing usable (e.g. a name of only punctuation).
pub fn slugify_or_placeholder(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        format!("listing-{}", Utc::now().timestamp())
    } else {
        slug
    }
}
