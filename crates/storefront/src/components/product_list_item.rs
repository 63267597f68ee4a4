//! Product summary shown in listing grids.

use askama::Template;
use rust_decimal::Decimal;
use vitrine_core::{CurrencyCode, Pricing, Product};

use super::{ViewError, localize, product_path};
use crate::assets::AssetResolver;
use crate::i18n::IntlContext;

/// Companion stylesheet requested at mount.
const STYLESHEET: &str = "product_list_item.css";

/// Which image a list item shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// The product's first image.
    Product(String),
    /// The configured placeholder, for products without images.
    Placeholder(String),
}

impl ImageSource {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Product(url) | Self::Placeholder(url) => url,
        }
    }

    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Price block of a list item.
///
/// `retail` and `currency` are exposed unchanged as machine-readable
/// metadata next to the human-readable `formatted` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    pub retail: Decimal,
    pub currency: CurrencyCode,
    pub formatted: String,
}

impl PriceView {
    fn new(pricing: &Pricing, intl: &IntlContext) -> Self {
        Self {
            retail: pricing.retail,
            currency: pricing.currency,
            formatted: intl.format_currency(pricing.retail, pricing.currency),
        }
    }
}

/// View model of one list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListItemView {
    pub href: String,
    pub name: String,
    /// The product has no name in the active locale; `name` is empty.
    pub name_missing: bool,
    pub sku: String,
    pub image: ImageSource,
    pub price: Option<PriceView>,
}

#[derive(Template)]
#[template(path = "components/product_list_item.html")]
struct ProductListItemTemplate<'a> {
    item: &'a ProductListItemView,
}

/// A mounted product list item.
///
/// The image is chosen once at mount, and again only when the product is
/// replaced by a different one.
#[derive(Debug)]
pub struct ProductListItem {
    product: Product,
    placeholder: String,
    image: ImageSource,
}

impl ProductListItem {
    /// Mount an item, resolving the placeholder image and requesting the
    /// item's stylesheet.
    #[must_use]
    pub fn mount(product: Product, assets: &dyn AssetResolver) -> Self {
        assets.request_stylesheet(STYLESHEET);
        let placeholder = assets.placeholder_image();
        let image = choose_image(&product, &placeholder);
        Self {
            product,
            placeholder,
            image,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Replace the product. The image is re-chosen only if the product differs.
    pub fn set_product(&mut self, product: Product) {
        if product != self.product {
            self.image = choose_image(&product, &self.placeholder);
            self.product = product;
        }
    }

    /// Derive the view model for the given render pass.
    #[must_use]
    pub fn view(&self, intl: &IntlContext) -> ProductListItemView {
        let product = &self.product;
        let name = localize(&product.name, intl, "product", product.id.as_str());

        ProductListItemView {
            href: product_path(intl.locale(), &product.id, &name.text),
            name: name.text,
            name_missing: name.missing,
            sku: product.sku.clone(),
            image: self.image.clone(),
            price: product
                .pricing
                .as_ref()
                .map(|pricing| PriceView::new(pricing, intl)),
        }
    }

    /// Render the item as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Render`] if the template fails to render.
    pub fn render(&self, intl: &IntlContext) -> Result<String, ViewError> {
        let item = self.view(intl);
        Ok(ProductListItemTemplate { item: &item }.render()?)
    }
}

fn choose_image(product: &Product, placeholder: &str) -> ImageSource {
    product.primary_image().map_or_else(
        || ImageSource::Placeholder(placeholder.to_string()),
        |image| ImageSource::Product(image.url.clone()),
    )
}
