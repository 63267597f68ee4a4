//! Product summary as read by listing views.

use serde::{Deserialize, Serialize};

use super::{CollectionId, LocalizedText, Pricing, ProductId};

/// A product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image URL.
    pub url: String,
}

/// A product as delivered by the catalog.
///
/// Products are immutable once loaded. `images` may be empty and `pricing`
/// may be absent; both are normal variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: LocalizedText,
    pub sku: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    /// Collections this product is listed in.
    #[serde(default)]
    pub collections: Vec<CollectionId>,
}

impl Product {
    /// The first image, if the product has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }

    /// Whether the product is listed in the given collection.
    #[must_use]
    pub fn in_collection(&self, collection: &CollectionId) -> bool {
        self.collections.contains(collection)
    }
}
