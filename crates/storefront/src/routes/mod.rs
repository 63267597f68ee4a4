//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /                                    - Redirect to the default locale
//! GET  /{locale}                            - Home page, every product
//! GET  /{locale}/collections/{id}/{slug}    - Collection page
//! GET  /{locale}/products/{id}/{slug}       - Product page
//! GET  /static/*                            - Static assets
//! ```
//!
//! Every page accepts `?drawer=menu|cart`, which opens that drawer before the
//! shell mounts. A collection or product URL with a missing or stale slug
//! redirects permanently to its canonical URL. Unknown locales, products
//! and collections render the not-found page with status 404.

pub mod collections;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use vitrine_core::{Drawer, Locale};

use crate::assets::STATIC_PREFIX;
use crate::error::{AppError, Result};
use crate::i18n::resolve_locale;
use crate::pages::{Page, RenderRequest, render_document};
use crate::state::AppState;

/// Query parameters understood by every page.
#[derive(Debug, Default, Deserialize)]
pub struct ShellQuery {
    pub drawer: Option<String>,
}

impl ShellQuery {
    /// The drawer to open before mounting the shell.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for anything but `menu` or `cart`.
    pub fn drawer(&self) -> Result<Option<Drawer>> {
        self.drawer
            .as_deref()
            .map(str::parse::<Drawer>)
            .transpose()
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Create the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .route("/{locale}", get(home::home))
        .route("/{locale}/collections/{id}", get(collections::show))
        .route("/{locale}/collections/{id}/{slug}", get(collections::show))
        .route("/{locale}/products/{id}", get(products::show))
        .route("/{locale}/products/{id}/{slug}", get(products::show))
}

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service(STATIC_PREFIX, static_dir)
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Any other path renders the not-found page in the default locale.
async fn fallback(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    not_found(&state, None, &uri, None)
}

/// Resolve the locale path segment against the supported locales.
fn locale_for(state: &AppState, segment: &str) -> Option<Locale> {
    resolve_locale(segment, state.config().locales.as_slice())
}

/// Render a page with the given status.
fn render(state: &AppState, request: RenderRequest<'_>, status: StatusCode) -> Result<Response> {
    let document = render_document(state, request)?;
    Ok((status, document).into_response())
}

/// Render the not-found page, in the default locale unless one was resolved.
fn not_found(
    state: &AppState,
    locale: Option<Locale>,
    uri: &Uri,
    drawer: Option<Drawer>,
) -> Result<Response> {
    tracing::debug!(path = uri.path(), "page not found");
    let locale = locale.unwrap_or_else(|| state.config().default_locale().clone());
    render(
        state,
        RenderRequest {
            page: Page::NotFound,
            locale,
            path: uri.path().to_string(),
            drawer,
        },
        StatusCode::NOT_FOUND,
    )
}

/// Permanent redirect to a canonical path, keeping the query string.
fn redirect_canonical(canonical: &str, uri: &Uri) -> Response {
    let mut location = url::Url::parse("http://localhost/").map_or_else(
        |_| canonical.to_string(),
        |mut url| {
            url.set_path(canonical);
            url.path().to_string()
        },
    );
    if let Some(query) = uri.query() {
        location.push('?');
        location.push_str(query);
    }
    tracing::debug!(from = uri.path(), to = %location, "redirecting to canonical url");

    match HeaderValue::try_from(location) {
        Ok(location) => (
            StatusCode::PERMANENT_REDIRECT,
            [(header::LOCATION, location)],
        )
            .into_response(),
        Err(_) => StatusCode::BAD_REQUEST.into_response(),
    }
}
