//! Presentation components.
//!
//! Components turn domain data and store state into view models, which the
//! askama templates render. They never mutate stores directly: the only
//! way out is dispatching an action through the injected [`FluxContext`].
//!
//! - [`ProductListItem`] - one product summary in a listing grid
//! - [`ApplicationShell`] - page chrome bound to the UI state stores
//!
//! [`FluxContext`]: crate::flux::FluxContext

mod application;
mod product_list_item;

pub use application::{
    ApplicationShell, MenuEntry, NotificationView, SUBSCRIBED_STORES, ShellState, ShellView,
    content_class, overlay_class,
};
pub use product_list_item::{ImageSource, PriceView, ProductListItem, ProductListItemView};

use thiserror::Error;
use vitrine_core::{CollectionId, Locale, LocalizedText, NavigationCollection, ProductId, slugify};

use crate::flux::FluxError;
use crate::i18n::IntlContext;

/// Errors raised while deriving or rendering views.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A localized field has no entry for the active locale. Reported, then
    /// rendered as an empty label.
    #[error("{entity} {id} has no name for locale {locale}")]
    MissingLocalization {
        entity: &'static str,
        id: String,
        locale: Locale,
    },

    /// The component could not read the stores it subscribes to.
    #[error("store subscription failed: {0}")]
    Subscription(#[from] FluxError),

    /// Template rendering failed.
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

/// A localized label and whether the translation was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Label {
    pub text: String,
    pub missing: bool,
}

/// Resolve a localized name, reporting a missing translation.
pub(crate) fn localize(
    text: &LocalizedText,
    intl: &IntlContext,
    entity: &'static str,
    id: &str,
) -> Label {
    text.get(intl.locale()).map_or_else(
        || {
            let error = ViewError::MissingLocalization {
                entity,
                id: id.to_string(),
                locale: intl.locale().clone(),
            };
            tracing::warn!(%error, "rendering empty label");
            Label {
                text: String::new(),
                missing: true,
            }
        },
        |name| Label {
            text: name.to_string(),
            missing: false,
        },
    )
}

/// Path of an entity page under `/{locale}/{section}/{id}`.
///
/// An empty slug leaves the slug segment out, so a name missing in the
/// locale still yields a routable URL.
#[must_use]
pub fn entity_path(locale: &str, section: &str, id: &str, slug: &str) -> String {
    if slug.is_empty() {
        format!("/{locale}/{section}/{id}")
    } else {
        format!("/{locale}/{section}/{id}/{slug}")
    }
}

/// Link target of a product page.
#[must_use]
pub fn product_path(locale: &Locale, id: &ProductId, name: &str) -> String {
    entity_path(locale.as_str(), "products", id.as_str(), &slugify(name))
}

/// Link target of a collection page.
#[must_use]
pub fn collection_path(locale: &Locale, id: &CollectionId, name: &str) -> String {
    entity_path(locale.as_str(), "collections", id.as_str(), &slugify(name))
}

/// A navigation menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

/// Map navigation collections to menu entries in the active locale.
#[must_use]
pub fn nav_links(collections: &[NavigationCollection], intl: &IntlContext) -> Vec<NavLink> {
    collections
        .iter()
        .map(|collection| {
            let label = localize(&collection.name, intl, "collection", collection.id.as_str());
            NavLink {
                path: collection_path(intl.locale(), &collection.id, &label.text),
                label: label.text,
            }
        })
        .collect()
}
