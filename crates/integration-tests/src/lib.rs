//! Integration tests for Vitrine.
//!
//! Shared fixtures for the black-box tests under `tests/`:
//!
//! - `data_flow` - store, shell and list item contract
//! - `http` - the server-rendered pages, driven in-process

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use tower::ServiceExt;
use vitrine_core::{Locale, Product};
use vitrine_storefront::catalog::Catalog;
use vitrine_storefront::config::StorefrontConfig;
use vitrine_storefront::i18n::IntlContext;
use vitrine_storefront::routes;
use vitrine_storefront::state::AppState;

/// A small catalog covering the interesting shapes: a product with and
/// without images, with and without pricing, and a missing translation.
pub const CATALOG: &str = r#"{
    "collections": [
        {"id": "men", "name": {"en": "Men", "pt": "Homem"}},
        {"id": "shirts", "name": {"en": "Shirts", "pt": "Camisas"}},
        {"id": "shoes", "name": {"en": "Shoes", "pt": "Calçado"}}
    ],
    "main_navigation": ["shirts", "shoes"],
    "tree": [{"id": "men", "children": [{"id": "shirts"}, {"id": "shoes"}]}],
    "products": [
        {
            "id": "p1",
            "name": {"en": "Blue Shirt", "pt": "Camisa Azul"},
            "sku": "SKU1",
            "pricing": {"retail": "19.99", "currency": "USD"},
            "collections": ["men", "shirts"]
        },
        {
            "id": "p2",
            "name": {"en": "Linen Shirt"},
            "sku": "SKU2",
            "images": [
                {"url": "https://cdn.example.com/linen-front.jpg"},
                {"url": "https://cdn.example.com/linen-back.jpg"}
            ],
            "pricing": {"retail": "1234.5", "currency": "EUR"},
            "collections": ["shirts"]
        },
        {
            "id": "p3",
            "name": {"en": "Trail Shoes", "pt": "Ténis de Trilho"},
            "sku": "SKU3",
            "collections": ["shoes"]
        }
    ]
}"#;

/// The fixture catalog.
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).unwrap()
}

/// A product from the fixture catalog.
///
/// # Panics
///
/// Panics if the product does not exist.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str) -> Product {
    catalog().product(&id.parse().unwrap()).unwrap().clone()
}

/// Render context for a locale tag.
///
/// # Panics
///
/// Panics if the tag is invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn intl(tag: &str) -> IntlContext {
    IntlContext::new(Locale::parse(tag).unwrap())
}

/// Application state with default configuration and the fixture catalog.
///
/// # Panics
///
/// Panics if the default configuration is invalid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn app_state() -> AppState {
    let config = StorefrontConfig::from_lookup(|key| match key {
        "STOREFRONT_BRAND" => Some("Test Shop".to_string()),
        "STOREFRONT_STATIC_DIR" => Some(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static").to_string(),
        ),
        _ => None,
    })
    .unwrap();
    AppState::new(config, catalog())
}

/// The full application router over [`app_state`].
#[must_use]
pub fn app() -> Router {
    routes::app(app_state())
}

/// Send a GET request through the router.
///
/// # Panics
///
/// Panics if the request cannot be built or the router fails.
#[allow(clippy::unwrap_used)]
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Read a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
#[allow(clippy::unwrap_used)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
