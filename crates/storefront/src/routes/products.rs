//! Product route handlers.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;
use vitrine_core::ProductId;

use super::{ShellQuery, locale_for, not_found, redirect_canonical, render};
use crate::components::{entity_path, product_path};
use crate::error::Result;
use crate::pages::{Page, RenderRequest};
use crate::state::AppState;

/// Path parameters of a product page. The slug is optional and only
/// checked against the canonical one.
#[derive(Debug, Deserialize)]
pub struct ProductPath {
    pub locale: String,
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(params): Path<ProductPath>,
    Query(query): Query<ShellQuery>,
    uri: Uri,
) -> Result<Response> {
    let drawer = query.drawer()?;
    let Some(locale) = locale_for(&state, &params.locale) else {
        return not_found(&state, None, &uri, drawer);
    };
    let Some(product) = params
        .id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().product(&id))
    else {
        return not_found(&state, Some(locale), &uri, drawer);
    };

    let name = product.name.get(&locale).unwrap_or_default();
    let canonical = product_path(&locale, &product.id, name);
    let requested = entity_path(
        &params.locale,
        "products",
        &params.id,
        params.slug.as_deref().unwrap_or_default(),
    );
    if requested != canonical {
        return Ok(redirect_canonical(&canonical, &uri));
    }

    render(
        &state,
        RenderRequest {
            page: Page::Product(product),
            locale,
            path: canonical,
            drawer,
        },
        StatusCode::OK,
    )
}
