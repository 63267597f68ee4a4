//! Collection route handlers.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;
use vitrine_core::CollectionId;

use super::{ShellQuery, locale_for, not_found, redirect_canonical, render};
use crate::components::{collection_path, entity_path};
use crate::error::Result;
use crate::pages::{Page, RenderRequest};
use crate::state::AppState;

/// Path parameters of a collection page.
#[derive(Debug, Deserialize)]
pub struct CollectionPath {
    pub locale: String,
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Display a collection's products.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(params): Path<CollectionPath>,
    Query(query): Query<ShellQuery>,
    uri: Uri,
) -> Result<Response> {
    let drawer = query.drawer()?;
    let Some(locale) = locale_for(&state, &params.locale) else {
        return not_found(&state, None, &uri, drawer);
    };
    let Some(collection) = params
        .id
        .parse::<CollectionId>()
        .ok()
        .and_then(|id| state.catalog().collection(&id))
    else {
        return not_found(&state, Some(locale), &uri, drawer);
    };

    let name = collection.name.get(&locale).unwrap_or_default();
    let canonical = collection_path(&locale, &collection.id, name);
    let requested = entity_path(
        &params.locale,
        "collections",
        &params.id,
        params.slug.as_deref().unwrap_or_default(),
    );
    if requested != canonical {
        return Ok(redirect_canonical(&canonical, &uri));
    }

    render(
        &state,
        RenderRequest {
            page: Page::Collection(collection),
            locale,
            path: canonical,
            drawer,
        },
        StatusCode::OK,
    )
}
