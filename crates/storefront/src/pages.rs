//! Page rendering: route content wrapped in the application shell.
//!
//! Every render builds its own [`FluxContext`], hydrates it from the catalog,
//! applies the request's UI intents, mounts the [`ApplicationShell`] and
//! renders the route content. Nothing here is `Send`; callers render
//! synchronously and only hand the finished [`Document`] across await points.

use askama::Template;
use askama_web::WebTemplate;
use vitrine_core::{Drawer, Locale, NavigationCollection, Product};

use crate::assets::{AssetResolver, STATIC_PREFIX, StaticAssets};
use crate::catalog::Catalog;
use crate::components::{
    ApplicationShell, ProductListItem, ProductListItemView, ShellView, ViewError, localize,
};
use crate::filters;
use crate::flux::{Action, FluxContext, FluxError};
use crate::i18n::IntlContext;
use crate::state::AppState;

/// The content a route renders inside the shell.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    /// Every product in the catalog.
    Home,
    Collection(&'a NavigationCollection),
    Product(&'a Product),
    NotFound,
}

/// A full HTML page.
#[derive(Debug, Template, WebTemplate)]
#[template(path = "application.html")]
pub struct Document {
    pub title: String,
    pub brand: String,
    /// Path of the page without query, used for drawer and dismiss links.
    pub current_path: String,
    pub stylesheets: Vec<String>,
    pub shell: ShellView,
    pub content: String,
}

#[derive(Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate<'a> {
    items: &'a [String],
}

#[derive(Template)]
#[template(path = "pages/collection.html")]
struct CollectionTemplate<'a> {
    title: &'a str,
    items: &'a [String],
}

#[derive(Template)]
#[template(path = "pages/product.html")]
struct ProductTemplate<'a> {
    item: &'a ProductListItemView,
    images: &'a [String],
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate<'a> {
    home: &'a str,
}

struct Content {
    title: Option<String>,
    html: String,
}

/// What a request asks to render.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub page: Page<'a>,
    pub locale: Locale,
    pub path: String,
    /// Drawer opened before the shell mounts.
    pub drawer: Option<Drawer>,
}

/// Render a page inside the application shell.
///
/// # Errors
///
/// Returns a [`ViewError`] if the stores refuse the initial actions or a
/// template fails to render.
pub fn render_document(
    state: &AppState,
    request: RenderRequest<'_>,
) -> Result<Document, ViewError> {
    let config = state.config();
    let context = FluxContext::new();
    context.batch(|context| {
        state.catalog().hydrate(context)?;
        if let Some(drawer) = request.drawer {
            context.dispatch(Action::TriggerDrawer(Some(drawer)))?;
        }
        Ok::<_, FluxError>(())
    })?;

    let assets = StaticAssets::new(STATIC_PREFIX, &config.placeholder_image);
    let shell = ApplicationShell::mount(&context, IntlContext::new(request.locale), &assets)?;
    let content = render_content(request.page, state.catalog(), shell.intl(), &assets)?;
    let shell = shell.view()?;

    let title = content.title.filter(|title| !title.is_empty()).map_or_else(
        || config.brand.clone(),
        |title| format!("{title} | {}", config.brand),
    );

    Ok(Document {
        title,
        brand: config.brand.clone(),
        current_path: request.path,
        stylesheets: assets.stylesheets(),
        shell,
        content: content.html,
    })
}

fn render_content(
    page: Page<'_>,
    catalog: &Catalog,
    intl: &IntlContext,
    assets: &dyn AssetResolver,
) -> Result<Content, ViewError> {
    match page {
        Page::Home => {
            let items = render_items(catalog.products().iter(), intl, assets)?;
            Ok(Content {
                title: None,
                html: HomeTemplate { items: &items }.render()?,
            })
        }
        Page::Collection(collection) => {
            let title = localize(&collection.name, intl, "collection", collection.id.as_str());
            let items = render_items(catalog.products_in(&collection.id), intl, assets)?;
            Ok(Content {
                html: CollectionTemplate {
                    title: &title.text,
                    items: &items,
                }
                .render()?,
                title: Some(title.text),
            })
        }
        Page::Product(product) => {
            let item = ProductListItem::mount(product.clone(), assets).view(intl);
            let images: Vec<String> = if product.images.is_empty() {
                vec![item.image.url().to_string()]
            } else {
                product
                    .images
                    .iter()
                    .map(|image| image.url.clone())
                    .collect()
            };
            Ok(Content {
                html: ProductTemplate {
                    item: &item,
                    images: &images,
                }
                .render()?,
                title: Some(item.name),
            })
        }
        Page::NotFound => {
            let home = format!("/{}", intl.locale());
            Ok(Content {
                title: Some("Page not found".to_string()),
                html: NotFoundTemplate { home: &home }.render()?,
            })
        }
    }
}

/// Render a grid of product list items.
fn render_items<'a>(
    products: impl Iterator<Item = &'a Product>,
    intl: &IntlContext,
    assets: &dyn AssetResolver,
) -> Result<Vec<String>, ViewError> {
    products
        .map(|product| ProductListItem::mount(product.clone(), assets).render(intl))
        .collect()
}
