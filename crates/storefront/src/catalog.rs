//! Product and collection catalog.
//!
//! The catalog is the upstream data source of the storefront: it is loaded
//! once at start-up and is read-only afterwards. Every render gets fresh
//! stores hydrated from it through [`Catalog::hydrate`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vitrine_core::{CollectionId, CollectionsTree, NavigationCollection, Product, ProductId};

use crate::flux::{Action, FluxContext, FluxError};

/// Errors loading or validating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("product {product} references unknown collection {collection}")]
    UnknownCollection {
        product: ProductId,
        collection: CollectionId,
    },

    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// All products and collections of the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    collections: Vec<NavigationCollection>,
    /// Collection ids shown in the header, in order.
    #[serde(default)]
    main_navigation: Vec<CollectionId>,
    #[serde(default)]
    tree: CollectionsTree,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Load and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid catalog
    /// JSON, or fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            products = catalog.products.len(),
            collections = catalog.collections.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid catalog JSON or fails
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Products must have unique ids and only reference known collections.
    ///
    /// Unknown main navigation entries are tolerated; they are skipped when
    /// the menu is built.
    fn validate(&self) -> Result<(), CatalogError> {
        for (index, product) in self.products.iter().enumerate() {
            if self.products[..index].iter().any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if let Some(collection) = product
                .collections
                .iter()
                .find(|id| self.collection(id).is_none())
            {
                return Err(CatalogError::UnknownCollection {
                    product: product.id.clone(),
                    collection: collection.clone(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn collection(&self, id: &CollectionId) -> Option<&NavigationCollection> {
        self.collections.iter().find(|c| &c.id == id)
    }

    /// Products in a collection, in catalog order.
    pub fn products_in<'a>(&'a self, id: &'a CollectionId) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.in_collection(id))
    }

    /// Feed the collections into a fresh set of stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the context refuses the dispatch.
    pub fn hydrate(&self, context: &FluxContext) -> Result<(), FluxError> {
        context.dispatch(Action::ReceiveCollections {
            collections: self.collections.clone(),
            main_navigation: self.main_navigation.clone(),
            tree: self.tree.clone(),
        })
    }
}
