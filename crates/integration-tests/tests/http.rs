//! Integration tests for the server-rendered storefront.
//!
//! Requests go through the full router in-process; no socket is bound.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use vitrine_integration_tests::{app, body_text, get};

// =============================================================================
// Health and Redirects
// =============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(app(), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_root_redirects_to_default_locale() {
    let response = get(app(), "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/en");
}

#[tokio::test]
async fn test_locale_variant_redirects_to_supported_locale() {
    let response = get(app(), "/pt-BR").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/pt");
}

#[tokio::test]
async fn test_stale_slug_redirects_to_canonical() {
    let response = get(app(), "/en/products/p1/old-name?drawer=cart").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/en/products/p1/blue-shirt?drawer=cart"
    );
}

#[tokio::test]
async fn test_missing_slug_redirects_to_canonical() {
    let response = get(app(), "/pt/collections/shirts").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/pt/collections/shirts/camisas"
    );
}

#[tokio::test]
async fn test_unicode_slug_is_percent_encoded() {
    let response = get(app(), "/pt/collections/shoes/x").await;
    assert_eq!(
        response.headers()[header::LOCATION],
        "/pt/collections/shoes/cal%C3%A7ado"
    );

    let response = get(app(), "/pt/collections/shoes/cal%C3%A7ado").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_translation_serves_slugless_url() {
    // p2 has no Portuguese name, so its canonical URL has no slug.
    let response = get(app(), "/pt/products/p2/linen-shirt").await;
    assert_eq!(response.headers()[header::LOCATION], "/pt/products/p2");

    let response = get(app(), "/pt/products/p2").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rendered_links_resolve() {
    let html = body_text(get(app(), "/pt").await).await;
    assert!(html.contains("href=\"/pt/products/p2\""));

    let links: Vec<&str> = html
        .split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter(|href| href.starts_with("/pt/products/") || href.starts_with("/pt/collections/"))
        .collect();
    assert!(!links.is_empty());

    let base = url::Url::parse("http://localhost/").unwrap();
    for href in links {
        // Browsers percent-encode unicode slugs before sending them.
        let uri = base.join(href).unwrap();
        let response = get(app(), uri.path()).await;
        assert_eq!(response.status(), StatusCode::OK, "{href}");
    }
}

// =============================================================================
// Pages
// =============================================================================

#[tokio::test]
async fn test_home_renders_shell_and_grid() {
    let response = get(app(), "/en").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;

    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("href=\"/en/products/p1/blue-shirt\""));
    assert!(html.contains("itemprop=\"price\" content=\"19.99\""));
    assert!(html.contains("href=\"/en/collections/shirts/shirts\""));
    assert!(html.contains("/static/css/application.css"));
    assert!(html.contains("/static/css/product_list_item.css"));
    assert!(html.contains("Test Shop"));
    assert!(html.contains("class=\"application__overlay\""));
}

#[tokio::test]
async fn test_collection_page_lists_its_products() {
    let html = body_text(get(app(), "/en/collections/shoes/shoes").await).await;

    assert!(html.contains("<title>Shoes | Test Shop</title>"));
    assert!(html.contains("/en/products/p3/trail-shoes"));
    assert!(!html.contains("/en/products/p1/blue-shirt"));
}

#[tokio::test]
async fn test_product_page_in_portuguese() {
    let html = body_text(get(app(), "/pt/products/p1/camisa-azul").await).await;

    assert!(html.contains("<html lang=\"pt\">"));
    assert!(html.contains("Camisa Azul"));
    assert!(html.contains("19,99 $"));
    assert!(html.contains("itemprop=\"priceCurrency\" content=\"USD\""));
}

#[tokio::test]
async fn test_drawer_query_opens_drawer() {
    let html = body_text(get(app(), "/en?drawer=menu").await).await;

    assert!(html.contains("application__overlay--left-drawer-open"));
    assert!(html.contains("application__container--left-drawer-open"));
    assert!(html.contains("application__drawer--left application__drawer--open"));
}

#[tokio::test]
async fn test_unknown_drawer_is_bad_request() {
    let response = get(app(), "/en?drawer=wishlist").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Not Found
// =============================================================================

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let response = get(app(), "/en/products/p404/anything").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));
}

#[tokio::test]
async fn test_unknown_locale_renders_default_locale_not_found() {
    let response = get(app(), "/fr/products/p1/blue-shirt").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("<html lang=\"en\">"));
}

#[tokio::test]
async fn test_unmatched_path_is_not_found() {
    let response = get(app(), "/en/checkout/now/please/ok").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Static Assets
// =============================================================================

#[tokio::test]
async fn test_static_stylesheet_served() {
    let response = get(app(), "/static/css/application.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(".application__overlay"));
}
