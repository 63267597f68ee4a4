//! The application's stores.
//!
//! Each store owns exactly one slice of UI state and is the only writer of
//! that slice. [`Stores`] routes every dispatched action to all of them and
//! reports which ones changed.

mod account;
mod application;
mod collections;
mod drawer;
mod notification_queue;
mod orders;
mod page_loading;
mod request;

pub use account::AccountStore;
pub use application::ApplicationStore;
pub use collections::CollectionsStore;
pub use drawer::DrawerStore;
pub use notification_queue::NotificationQueueStore;
pub use orders::OrdersStore;
pub use page_loading::PageLoadingStore;

use super::{Action, Store, StoreSet};

/// All stores of one [`FluxContext`](super::FluxContext).
#[derive(Debug, Default)]
pub struct Stores {
    pub(crate) account: AccountStore,
    pub(crate) application: ApplicationStore,
    pub(crate) collections: CollectionsStore,
    pub(crate) drawer: DrawerStore,
    pub(crate) notifications: NotificationQueueStore,
    pub(crate) orders: OrdersStore,
    pub(crate) page_loading: PageLoadingStore,
}

impl Stores {
    /// Route an action to every store. Returns the set of stores that changed.
    pub(crate) fn handle(&mut self, action: &Action) -> StoreSet {
        apply(&mut self.account, action)
            | apply(&mut self.application, action)
            | apply(&mut self.collections, action)
            | apply(&mut self.drawer, action)
            | apply(&mut self.notifications, action)
            | apply(&mut self.orders, action)
            | apply(&mut self.page_loading, action)
    }
}

fn apply<S: Store>(store: &mut S, action: &Action) -> StoreSet {
    if store.handle(action) {
        StoreSet::of(S::ID)
    } else {
        StoreSet::EMPTY
    }
}
