//! URL slug derivation.

/// Separator placed between alphanumeric runs.
const SEPARATOR: char = '-';

/// Derive a URL-safe slug from a display name.
///
/// The name is lowercased, every run of non-alphanumeric characters becomes
/// a single `-`, and leading/trailing separators are dropped. Letters outside
/// ASCII are kept (lowercased) rather than transliterated.
///
/// The function is pure: equal inputs always produce equal slugs.
///
/// ```
/// use vitrine_core::slugify;
///
/// assert_eq!(slugify("Blue Shirt"), "blue-shirt");
/// assert_eq!(slugify("  T-Shirts & Tops!! "), "t-shirts-tops");
/// assert_eq!(slugify(""), "");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}
