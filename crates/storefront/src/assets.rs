//! Static presentation assets.
//!
//! Components ask for their companion stylesheet when they mount and resolve
//! the product placeholder image once. Neither affects any state used for
//! logic: a stylesheet request only records the asset so the page head can
//! link it.

use std::cell::RefCell;

/// URL prefix the static directory is served under.
pub const STATIC_PREFIX: &str = "/static";

/// Resolves and loads static assets on behalf of components.
pub trait AssetResolver {
    /// Public URL of a static asset path such as `images/logo.png`.
    fn resolve(&self, path: &str) -> String;

    /// Public URL of the image shown for products without images.
    fn placeholder_image(&self) -> String;

    /// Ask for a stylesheet to be loaded. Never blocks.
    fn request_stylesheet(&self, name: &str);
}

/// Assets served from the storefront's `/static` directory.
///
/// Collects stylesheet requests for one render pass in first-request order,
/// without duplicates.
#[derive(Debug)]
pub struct StaticAssets {
    prefix: String,
    placeholder: String,
    stylesheets: RefCell<Vec<String>>,
}

impl StaticAssets {
    /// Create a resolver for assets mounted at `prefix`.
    #[must_use]
    pub fn new(prefix: &str, placeholder: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
            placeholder: placeholder.trim_start_matches('/').to_string(),
            stylesheets: RefCell::new(Vec::new()),
        }
    }

    /// URLs of every stylesheet requested so far.
    #[must_use]
    pub fn stylesheets(&self) -> Vec<String> {
        self.stylesheets
            .borrow()
            .iter()
            .map(|name| self.resolve(&format!("css/{name}")))
            .collect()
    }
}

impl AssetResolver for StaticAssets {
    fn resolve(&self, path: &str) -> String {
        format!("{}/{}", self.prefix, path.trim_start_matches('/'))
    }

    fn placeholder_image(&self) -> String {
        self.resolve(&self.placeholder)
    }

    fn request_stylesheet(&self, name: &str) {
        let mut stylesheets = self.stylesheets.borrow_mut();
        if !stylesheets.iter().any(|s| s == name) {
            tracing::trace!(stylesheet = name, "stylesheet requested");
            stylesheets.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_prefix() {
        let assets = StaticAssets::new("/static/", "images/image_placeholder.png");
        assert_eq!(assets.resolve("images/a.png"), "/static/images/a.png");
        assert_eq!(assets.resolve("/images/a.png"), "/static/images/a.png");
        assert_eq!(
            assets.placeholder_image(),
            "/static/images/image_placeholder.png"
        );
    }

    #[test]
    fn test_stylesheets_deduplicated_in_request_order() {
        let assets = StaticAssets::new("/static", "placeholder.png");
        assets.request_stylesheet("application.css");
        assets.request_stylesheet("product_list_item.css");
        assets.request_stylesheet("application.css");

        assert_eq!(
            assets.stylesheets(),
            vec![
                "/static/css/application.css".to_string(),
                "/static/css/product_list_item.css".to_string(),
            ]
        );
    }
}
