//! Application shell: page chrome bound to the UI state stores.

use std::cell::RefCell;
use std::rc::Rc;

use vitrine_core::{
    CollectionNode, CollectionsTree, Drawer, NavigationCollection, Notification, NotificationKind,
    Role,
};

use super::{NavLink, ViewError, collection_path, localize, nav_links};
use crate::assets::AssetResolver;
use crate::flux::stores::CollectionsStore;
use crate::flux::{Action, FluxContext, StoreId, StoreReader, StoreSet, Subscription};
use crate::i18n::IntlContext;

/// Companion stylesheet requested at mount.
const STYLESHEET: &str = "application.css";

/// The stores the shell listens to.
pub const SUBSCRIBED_STORES: StoreSet = StoreSet::of(StoreId::Account)
    .with(StoreId::Collections)
    .with(StoreId::Drawer)
    .with(StoreId::NotificationQueue)
    .with(StoreId::PageLoading);

/// The shell's local projection of the store slices it renders.
///
/// Always replaced as a whole, never field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellState {
    pub nav_collections: Vec<NavigationCollection>,
    pub collections_tree: CollectionsTree,
    /// Popped from the notification queue when this state was read.
    pub notification: Option<Notification>,
    pub opened_drawer: Option<Drawer>,
    pub page_loading: bool,
}

impl ShellState {
    /// Read every slice from the stores. Pops the notification queue.
    fn read(reader: &mut StoreReader<'_>) -> Self {
        Self {
            nav_collections: reader.collections().main_navigation_collections(),
            collections_tree: reader.collections().collections_tree().clone(),
            notification: reader.pop_notification(),
            opened_drawer: reader.drawer().opened_drawer(),
            page_loading: reader.page_loading().is_loading(),
        }
    }
}

#[derive(Debug)]
struct Projection {
    state: ShellState,
    revision: u64,
}

/// A notification as rendered at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    /// Fresh element key, so every displayed notification is a new element.
    pub key: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// One row of the collections menu, flattened depth first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub path: String,
    pub depth: usize,
}

/// Everything the shell template needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub locale: String,
    pub overlay_class: String,
    pub content_class: String,
    pub menu_open: bool,
    pub cart_open: bool,
    pub page_loading: bool,
    pub is_admin: bool,
    pub notification: Option<NotificationView>,
    pub nav_links: Vec<NavLink>,
    pub menu: Vec<MenuEntry>,
}

/// CSS classes of the click-to-close overlay.
#[must_use]
pub fn overlay_class(opened: Option<Drawer>) -> String {
    with_drawer_modifier("application__overlay", opened)
}

/// CSS classes of the main content container.
#[must_use]
pub fn content_class(opened: Option<Drawer>) -> String {
    with_drawer_modifier("application__container", opened)
}

fn flatten_tree(
    nodes: &[CollectionNode],
    depth: usize,
    collections: &CollectionsStore,
    intl: &IntlContext,
    out: &mut Vec<MenuEntry>,
) {
    for node in nodes {
        // Tree nodes without catalog data are skipped along with their subtree.
        let Some(collection) = collections.collection(&node.id) else {
            continue;
        };
        let label = localize(&collection.name, intl, "collection", node.id.as_str());
        out.push(MenuEntry {
            path: collection_path(intl.locale(), &node.id, &label.text),
            label: label.text,
            depth,
        });
        flatten_tree(&node.children, depth + 1, collections, intl, out);
    }
}

fn with_drawer_modifier(base: &str, opened: Option<Drawer>) -> String {
    match opened {
        None => base.to_string(),
        Some(Drawer::Menu) => format!("{base} {base}--left-drawer-open"),
        Some(Drawer::Cart) => format!("{base} {base}--right-drawer-open"),
    }
}

/// The mounted application shell.
///
/// At mount the shell reads every subscribed slice once and subscribes to
/// [`SUBSCRIBED_STORES`]. Each change notification re-reads all slices and
/// replaces the local projection in one step. Rendering never re-reads the
/// projected slices, so a popped notification is shown until the next store
/// change. Dropping the shell unsubscribes.
pub struct ApplicationShell {
    context: FluxContext,
    intl: IntlContext,
    projection: Rc<RefCell<Projection>>,
    _subscription: Subscription,
}

impl std::fmt::Debug for ApplicationShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationShell")
            .field("intl", &self.intl)
            .field("projection", &self.projection.borrow())
            .finish_non_exhaustive()
    }
}

impl ApplicationShell {
    /// Seed the shell from the stores and subscribe to their changes.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Subscription`] if the stores cannot be read,
    /// which happens when mounting from inside a notification pass.
    pub fn mount(
        context: &FluxContext,
        intl: IntlContext,
        assets: &dyn AssetResolver,
    ) -> Result<Self, ViewError> {
        let initial = context.read(ShellState::read)?;
        let projection = Rc::new(RefCell::new(Projection {
            state: initial,
            revision: 0,
        }));

        let sink = Rc::downgrade(&projection);
        let subscription = context.subscribe(SUBSCRIBED_STORES, move |reader| {
            let Some(projection) = sink.upgrade() else {
                return;
            };
            let state = ShellState::read(reader);
            let mut projection = projection.borrow_mut();
            projection.state = state;
            projection.revision += 1;
            tracing::trace!(
                revision = projection.revision,
                changed = ?reader.changed(),
                "shell state refreshed"
            );
        });

        assets.request_stylesheet(STYLESHEET);

        Ok(Self {
            context: context.clone(),
            intl,
            projection,
            _subscription: subscription,
        })
    }

    /// Current projection of the subscribed slices.
    #[must_use]
    pub fn state(&self) -> ShellState {
        self.projection.borrow().state.clone()
    }

    /// Number of refreshes since mount. Each change notification is one refresh.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.projection.borrow().revision
    }

    #[must_use]
    pub const fn intl(&self) -> &IntlContext {
        &self.intl
    }

    /// Derive the view model for a render pass.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Subscription`] if the stores are busy.
    pub fn view(&self) -> Result<ShellView, ViewError> {
        let state = self.state();
        let (is_admin, notification_key, menu) = self.context.read(|reader| {
            let is_admin = reader.account().is_authorized(&[Role::Admin]);
            let key = state.notification.as_ref().map(|_| reader.unique_id());
            let mut menu = Vec::new();
            flatten_tree(
                state.collections_tree.roots(),
                0,
                reader.collections(),
                &self.intl,
                &mut menu,
            );
            (is_admin, key, menu)
        })?;

        let notification = state
            .notification
            .zip(notification_key)
            .map(|(notification, key)| NotificationView {
                key,
                kind: notification.kind,
                message: notification.message,
            });

        Ok(ShellView {
            locale: self.intl.locale().to_string(),
            overlay_class: overlay_class(state.opened_drawer),
            content_class: content_class(state.opened_drawer),
            menu_open: state.opened_drawer == Some(Drawer::Menu),
            cart_open: state.opened_drawer == Some(Drawer::Cart),
            page_loading: state.page_loading,
            is_admin,
            notification,
            nav_links: nav_links(&state.nav_collections, &self.intl),
            menu,
        })
    }

    /// The user dismissed the notification.
    pub fn dismiss_notification(&self) {
        self.execute(Action::PopNotification);
    }

    /// The user clicked the overlay: close every drawer.
    pub fn toggle_overlay(&self) {
        self.execute(Action::TriggerDrawer(None));
    }

    /// The user asked for a drawer from the header.
    pub fn open_drawer(&self, drawer: Drawer) {
        self.execute(Action::TriggerDrawer(Some(drawer)));
    }

    fn execute(&self, action: Action) {
        let name = action.name();
        if let Err(error) = self.context.dispatch(action) {
            tracing::warn!(action = name, %error, "action dispatch failed");
        }
    }
}
