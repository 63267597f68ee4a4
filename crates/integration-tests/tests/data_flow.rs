//! Integration tests for the store and component data flow.
//!
//! Drives the public Flux and component API the way the server does, and
//! checks the observable contract: view derivation, destructive
//! notification reads, drawer transitions and batched re-renders.

#![allow(clippy::unwrap_used)]

use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

use rust_decimal::Decimal;
use vitrine_core::{CurrencyCode, Drawer, Notification, slugify};
use vitrine_integration_tests::{catalog, intl, product};
use vitrine_storefront::assets::StaticAssets;
use vitrine_storefront::components::{ApplicationShell, ImageSource, ProductListItem};
use vitrine_storefront::flux::{Action, FluxContext, StoreId, StoreSet};

fn assets() -> StaticAssets {
    StaticAssets::new("/static", "images/image_placeholder.png")
}

fn mounted_shell(ctx: &FluxContext) -> ApplicationShell {
    catalog().hydrate(ctx).unwrap();
    ApplicationShell::mount(ctx, intl("en"), &assets()).unwrap()
}

// =============================================================================
// Product List Item
// =============================================================================

#[test]
fn test_blue_shirt_reference_example() {
    let item = ProductListItem::mount(product("p1"), &assets());
    let view = item.view(&intl("en"));

    assert_eq!(view.href, "/en/products/p1/blue-shirt");
    assert_eq!(
        view.image,
        ImageSource::Placeholder("/static/images/image_placeholder.png".to_string())
    );
    let price = view.price.unwrap();
    assert_eq!(price.retail, Decimal::from_str("19.99").unwrap());
    assert_eq!(price.currency, CurrencyCode::USD);
}

#[test]
fn test_image_is_first_entry_or_placeholder_and_stable() {
    let assets = assets();
    for id in ["p1", "p2", "p3"] {
        let product = product(id);
        let item = ProductListItem::mount(product.clone(), &assets);
        let first = item.view(&intl("en")).image;

        match product.images.first() {
            Some(image) => assert_eq!(first.url(), image.url),
            None => assert!(first.is_placeholder()),
        }
        assert_eq!(item.view(&intl("pt")).image, first);
    }
}

#[test]
fn test_machine_readable_price_is_exact() {
    let view = ProductListItem::mount(product("p2"), &assets()).view(&intl("pt"));
    let price = view.price.unwrap();

    assert_eq!(price.retail, Decimal::from_str("1234.5").unwrap());
    assert_eq!(price.formatted, "1.234,50 €");

    let html = ProductListItem::mount(product("p2"), &assets())
        .render(&intl("en"))
        .unwrap();
    assert!(html.contains("content=\"1234.5\""));
    assert!(html.contains("€1,234.50"));
}

#[test]
fn test_no_pricing_no_price_block() {
    let item = ProductListItem::mount(product("p3"), &assets());
    assert!(item.view(&intl("en")).price.is_none());
    assert!(!item.render(&intl("en")).unwrap().contains("priceCurrency"));
}

#[test]
fn test_missing_translation_degrades() {
    let view = ProductListItem::mount(product("p2"), &assets()).view(&intl("pt"));
    assert!(view.name_missing);
    assert_eq!(view.name, "");
    assert_eq!(view.href, "/pt/products/p2");
}

#[test]
fn test_slugify_is_deterministic() {
    for name in ["Blue Shirt", "  Ténis de Trilho!! ", "A/B & C", ""] {
        assert_eq!(slugify(name), slugify(name));
    }
    assert_eq!(slugify("A/B & C"), "a-b-c");
}

// =============================================================================
// Notifications
// =============================================================================

#[test]
fn test_pop_twice_yields_value_then_none() {
    let ctx = FluxContext::new();
    ctx.dispatch(Action::PushNotification(Notification::error("Out of stock")))
        .unwrap();

    let first = ctx.read(|reader| reader.pop_notification()).unwrap();
    let second = ctx.read(|reader| reader.pop_notification()).unwrap();

    assert_eq!(first, Some(Notification::error("Out of stock")));
    assert_eq!(second, None);
}

#[test]
fn test_shell_renders_popped_notification_once() {
    let ctx = FluxContext::new();
    ctx.dispatch(Action::PushNotification(Notification::error("Out of stock")))
        .unwrap();
    let shell = mounted_shell(&ctx);

    // Re-rendering without a store change keeps the popped value.
    assert!(shell.view().unwrap().notification.is_some());
    assert!(shell.view().unwrap().notification.is_some());

    shell.dismiss_notification();
    assert!(shell.view().unwrap().notification.is_none());
}

// =============================================================================
// Drawers
// =============================================================================

#[test]
fn test_overlay_click_closes_cart_drawer() {
    let ctx = FluxContext::new();
    let shell = mounted_shell(&ctx);
    shell.open_drawer(Drawer::Cart);
    assert_eq!(shell.state().opened_drawer, Some(Drawer::Cart));

    shell.toggle_overlay();
    let view = shell.view().unwrap();

    assert_eq!(shell.state().opened_drawer, None);
    assert!(!view.overlay_class.contains("right-drawer-open"));
    assert!(!view.content_class.contains("right-drawer-open"));
}

#[test]
fn test_drawer_transitions_from_any_state() {
    let ctx = FluxContext::new();
    let shell = mounted_shell(&ctx);

    for (target, expected) in [
        (Some(Drawer::Menu), Some(Drawer::Menu)),
        (Some(Drawer::Cart), Some(Drawer::Cart)),
        (Some(Drawer::Menu), Some(Drawer::Menu)),
        (None, None),
        (None, None),
    ] {
        ctx.dispatch(Action::TriggerDrawer(target)).unwrap();
        assert_eq!(shell.state().opened_drawer, expected);
    }
}

#[test]
fn test_user_actions_dispatch_exactly_one_action() {
    let ctx = FluxContext::new();
    let shell = mounted_shell(&ctx);
    let drawer_changes = Rc::new(Cell::new(0));
    let queue_changes = Rc::new(Cell::new(0));

    let drawer_counter = Rc::clone(&drawer_changes);
    let _drawer = ctx.subscribe(StoreSet::of(StoreId::Drawer), move |_| {
        drawer_counter.set(drawer_counter.get() + 1);
    });
    let queue_counter = Rc::clone(&queue_changes);
    let _queue = ctx.subscribe(StoreSet::of(StoreId::NotificationQueue), move |_| {
        queue_counter.set(queue_counter.get() + 1);
    });

    shell.open_drawer(Drawer::Menu);
    shell.toggle_overlay();
    shell.dismiss_notification();

    assert_eq!(drawer_changes.get(), 2);
    assert_eq!(queue_changes.get(), 1);
}

// =============================================================================
// Batching
// =============================================================================

#[test]
fn test_simultaneous_changes_render_once() {
    let ctx = FluxContext::new();
    let shell = mounted_shell(&ctx);
    let before = shell.revision();

    ctx.batch(|ctx| {
        ctx.dispatch(Action::PageLoading(true)).unwrap();
        ctx.dispatch(Action::TriggerDrawer(Some(Drawer::Cart)))
            .unwrap();
    });

    assert_eq!(shell.revision(), before + 1);
    let state = shell.state();
    assert!(state.page_loading);
    assert_eq!(state.opened_drawer, Some(Drawer::Cart));
}

#[test]
fn test_navigate_is_one_action_one_render() {
    let ctx = FluxContext::new();
    let shell = mounted_shell(&ctx);
    shell.open_drawer(Drawer::Menu);
    let before = shell.revision();

    ctx.dispatch(Action::Navigate {
        path: "/en/collections/shirts/shirts".to_string(),
    })
    .unwrap();

    assert_eq!(shell.revision(), before + 1);
    assert!(shell.state().page_loading);
    assert_eq!(shell.state().opened_drawer, None);
}

#[test]
fn test_nav_links_follow_locale() {
    let ctx = FluxContext::new();
    catalog().hydrate(&ctx).unwrap();
    let shell = ApplicationShell::mount(&ctx, intl("pt"), &assets()).unwrap();

    let paths: Vec<String> = shell
        .view()
        .unwrap()
        .nav_links
        .into_iter()
        .map(|link| link.path)
        .collect();
    assert_eq!(
        paths,
        vec![
            "/pt/collections/shirts/camisas".to_string(),
            "/pt/collections/shoes/calçado".to_string(),
        ]
    );
}
