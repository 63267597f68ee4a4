//! Home page handlers.

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Redirect, Response},
};
use tracing::instrument;

use super::{ShellQuery, locale_for, not_found, redirect_canonical, render};
use crate::error::Result;
use crate::pages::{Page, RenderRequest};
use crate::state::AppState;

/// Send visitors without a locale to the default one.
#[instrument(skip(state))]
pub async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.config().default_locale()))
}

/// Display the home page: every product as a grid.
#[instrument(skip(state))]
pub async fn home(
    State(state): State<AppState>,
    Path(locale): Path<String>,
    Query(query): Query<ShellQuery>,
    uri: Uri,
) -> Result<Response> {
    let drawer = query.drawer()?;
    let Some(resolved) = locale_for(&state, &locale) else {
        return not_found(&state, None, &uri, drawer);
    };

    let canonical = format!("/{resolved}");
    if uri.path() != canonical {
        return Ok(redirect_canonical(&canonical, &uri));
    }

    render(
        &state,
        RenderRequest {
            page: Page::Home,
            locale: resolved,
            path: canonical,
            drawer,
        },
        StatusCode::OK,
    )
}
