//! The per-render Flux context: stores, dispatch and subscriptions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use vitrine_core::Notification;

use super::stores::{
    AccountStore, ApplicationStore, CollectionsStore, DrawerStore, NotificationQueueStore,
    OrdersStore, PageLoadingStore, Stores,
};
use super::{Action, FluxError, RequestId, StoreSet};

type Callback = Box<dyn FnMut(&mut StoreReader<'_>)>;

struct Listener {
    id: u64,
    stores: StoreSet,
    active: Cell<bool>,
    callback: RefCell<Callback>,
}

struct ContextInner {
    stores: RefCell<Stores>,
    listeners: RefCell<Vec<Rc<Listener>>>,
    pending: Cell<StoreSet>,
    batch_depth: Cell<u32>,
    notifying: Cell<bool>,
    next_listener_id: Cell<u64>,
    next_request_id: Cell<u64>,
}

impl ContextInner {
    fn remove_listener(&self, id: u64) {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            let position = listeners.iter().position(|listener| listener.id == id);
            position.map(|pos| listeners.remove(pos))
        };
        // Dropped after the borrow ends: the callback may own other subscriptions.
        if let Some(listener) = removed {
            listener.active.set(false);
            tracing::debug!(subscription = id, "unsubscribed");
        }
    }
}

/// Handle to the stores of one application instance.
///
/// The context is single-threaded: it is cheaply cloneable via `Rc` and all
/// dispatches, reads and notifications run to completion on the calling
/// thread. A dispatch routes the action to every store, then notifies each
/// subscriber whose store set intersects the changed stores exactly once.
#[derive(Clone)]
pub struct FluxContext {
    inner: Rc<ContextInner>,
}

impl Default for FluxContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FluxContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluxContext")
            .field("listeners", &self.listener_count())
            .field("notifying", &self.inner.notifying.get())
            .finish_non_exhaustive()
    }
}

impl FluxContext {
    /// Create a context with every store in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ContextInner {
                stores: RefCell::new(Stores::default()),
                listeners: RefCell::new(Vec::new()),
                pending: Cell::new(StoreSet::EMPTY),
                batch_depth: Cell::new(0),
                notifying: Cell::new(false),
                next_listener_id: Cell::new(1),
                next_request_id: Cell::new(1),
            }),
        }
    }

    /// Dispatch an action to all stores.
    ///
    /// Subscribers are notified before this returns, unless the dispatch
    /// happens inside [`FluxContext::batch`], in which case they are notified
    /// once when the outermost batch ends.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::DispatchDuringNotification`] when called from a
    /// subscriber callback and [`FluxError::StoresBusy`] when called from
    /// inside [`FluxContext::read`].
    pub fn dispatch(&self, action: Action) -> Result<(), FluxError> {
        let inner = &self.inner;
        if inner.notifying.get() {
            tracing::warn!(
                action = action.name(),
                "refusing dispatch during notification"
            );
            return Err(FluxError::DispatchDuringNotification {
                action: action.name(),
            });
        }

        let changed = inner
            .stores
            .try_borrow_mut()
            .map_err(|_| FluxError::StoresBusy)?
            .handle(&action);
        tracing::debug!(action = action.name(), changed = ?changed, "dispatched");

        inner.pending.set(inner.pending.get() | changed);
        if inner.batch_depth.get() == 0 {
            self.notify();
        }
        Ok(())
    }

    /// Run `f` with notifications deferred, so that every store change made
    /// inside reaches each subscriber in a single notification.
    pub fn batch<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        let result = {
            let _depth = BatchGuard::enter(&self.inner.batch_depth);
            f(self)
        };
        if self.inner.batch_depth.get() == 0 {
            self.notify();
        }
        result
    }

    /// Read the stores synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`FluxError::StoresBusy`] when the stores are already held by
    /// a notification pass or an enclosing read.
    pub fn read<R>(&self, f: impl FnOnce(&mut StoreReader<'_>) -> R) -> Result<R, FluxError> {
        let mut stores = self
            .inner
            .stores
            .try_borrow_mut()
            .map_err(|_| FluxError::StoresBusy)?;
        let mut reader = StoreReader::new(&mut stores, StoreSet::EMPTY);
        Ok(f(&mut reader))
    }

    /// Register `callback` for changes to any store in `stores`.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe<F>(&self, stores: StoreSet, callback: F) -> Subscription
    where
        F: FnMut(&mut StoreReader<'_>) + 'static,
    {
        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);

        self.inner.listeners.borrow_mut().push(Rc::new(Listener {
            id,
            stores,
            active: Cell::new(true),
            callback: RefCell::new(Box::new(callback)),
        }));
        tracing::debug!(subscription = id, stores = ?stores, "subscribed");

        Subscription {
            id,
            stores,
            context: Rc::downgrade(&self.inner),
        }
    }

    /// Allocate a fresh id for an asynchronous request.
    #[must_use]
    pub fn next_request_id(&self) -> RequestId {
        let id = self.inner.next_request_id.get();
        self.inner.next_request_id.set(id + 1);
        RequestId::new(id)
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    fn notify(&self) {
        let inner = &self.inner;
        if inner.notifying.get() {
            return;
        }
        let changed = inner.pending.replace(StoreSet::EMPTY);
        if changed.is_empty() {
            return;
        }

        let listeners: Vec<Rc<Listener>> = inner
            .listeners
            .borrow()
            .iter()
            .filter(|listener| listener.stores.intersects(changed))
            .cloned()
            .collect();

        let _notifying = NotifyingGuard::enter(&inner.notifying);
        for listener in listeners {
            if !listener.active.get() {
                continue;
            }
            let Ok(mut stores) = inner.stores.try_borrow_mut() else {
                tracing::warn!(
                    subscription = listener.id,
                    "stores busy, skipping subscriber"
                );
                continue;
            };
            let mut reader = StoreReader::new(&mut stores, changed);
            let mut callback = listener.callback.borrow_mut();
            (*callback)(&mut reader);
        }
    }
}

/// Keeps a callback registered with a [`FluxContext`]. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    stores: StoreSet,
    context: Weak<ContextInner>,
}

impl Subscription {
    /// The stores this subscription listens to.
    #[must_use]
    pub const fn stores(&self) -> StoreSet {
        self.stores
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("stores", &self.stores)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.context.upgrade() {
            inner.remove_listener(self.id);
        }
    }
}

/// Read access to the stores.
///
/// Everything here is a plain read except [`StoreReader::pop_notification`]
/// and [`StoreReader::unique_id`], which consume queue entries and keys.
pub struct StoreReader<'a> {
    stores: &'a mut Stores,
    changed: StoreSet,
}

impl<'a> StoreReader<'a> {
    const fn new(stores: &'a mut Stores, changed: StoreSet) -> Self {
        Self { stores, changed }
    }

    /// Stores whose change triggered this read. Empty outside notifications.
    #[must_use]
    pub const fn changed(&self) -> StoreSet {
        self.changed
    }

    #[must_use]
    pub fn account(&self) -> &AccountStore {
        &self.stores.account
    }

    #[must_use]
    pub fn application(&self) -> &ApplicationStore {
        &self.stores.application
    }

    #[must_use]
    pub fn collections(&self) -> &CollectionsStore {
        &self.stores.collections
    }

    #[must_use]
    pub fn drawer(&self) -> &DrawerStore {
        &self.stores.drawer
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationQueueStore {
        &self.stores.notifications
    }

    #[must_use]
    pub fn orders(&self) -> &OrdersStore {
        &self.stores.orders
    }

    #[must_use]
    pub fn page_loading(&self) -> &PageLoadingStore {
        &self.stores.page_loading
    }

    /// Destructive read of the notification queue.
    pub fn pop_notification(&mut self) -> Option<Notification> {
        self.stores.notifications.pop()
    }

    /// A fresh element key from the application store.
    pub fn unique_id(&mut self) -> u64 {
        self.stores.application.unique_id()
    }
}

struct NotifyingGuard<'a>(&'a Cell<bool>);

impl<'a> NotifyingGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct BatchGuard<'a>(&'a Cell<u32>);

impl<'a> BatchGuard<'a> {
    fn enter(depth: &'a Cell<u32>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for BatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use vitrine_core::{Drawer, Notification};

    use super::*;
    use crate::flux::StoreId;

    fn recorder(ctx: &FluxContext, stores: StoreSet) -> (Subscription, Rc<RefCell<Vec<StoreSet>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let subscription = ctx.subscribe(stores, move |reader| {
            sink.borrow_mut().push(reader.changed());
        });
        (subscription, calls)
    }

    #[test]
    fn test_subscriber_notified_for_its_stores_only() {
        let ctx = FluxContext::new();
        let (_sub, calls) = recorder(&ctx, StoreSet::of(StoreId::Drawer));

        ctx.dispatch(Action::PageLoading(true)).unwrap();
        assert!(calls.borrow().is_empty());

        ctx.dispatch(Action::TriggerDrawer(Some(Drawer::Cart)))
            .unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_no_notification_without_change() {
        let ctx = FluxContext::new();
        let (_sub, calls) = recorder(&ctx, StoreSet::of(StoreId::Drawer));

        ctx.dispatch(Action::TriggerDrawer(None)).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_batch_notifies_once_with_union_of_changes() {
        let ctx = FluxContext::new();
        let stores = StoreSet::of(StoreId::Drawer).with(StoreId::PageLoading);
        let (_sub, calls) = recorder(&ctx, stores);

        ctx.batch(|ctx| {
            ctx.dispatch(Action::PageLoading(true)).unwrap();
            ctx.dispatch(Action::TriggerDrawer(Some(Drawer::Menu)))
                .unwrap();
        });

        assert_eq!(*calls.borrow(), vec![stores]);
    }

    #[test]
    fn test_nested_batches_notify_at_outermost_end() {
        let ctx = FluxContext::new();
        let (_sub, calls) = recorder(&ctx, StoreSet::of(StoreId::PageLoading));

        ctx.batch(|ctx| {
            ctx.batch(|ctx| ctx.dispatch(Action::PageLoading(true)).unwrap());
            assert!(calls.borrow().is_empty());
        });

        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let ctx = FluxContext::new();
        let (sub, calls) = recorder(&ctx, StoreSet::of(StoreId::PageLoading));
        assert_eq!(ctx.listener_count(), 1);

        drop(sub);
        assert_eq!(ctx.listener_count(), 0);

        ctx.dispatch(Action::PageLoading(true)).unwrap();
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_dispatch_during_notification_is_refused() {
        let ctx = FluxContext::new();
        let inner_ctx = ctx.clone();
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let _sub = ctx.subscribe(StoreSet::of(StoreId::PageLoading), move |_| {
            *sink.borrow_mut() = Some(inner_ctx.dispatch(Action::PopNotification));
        });

        ctx.dispatch(Action::PageLoading(true)).unwrap();

        assert_eq!(
            *result.borrow(),
            Some(Err(FluxError::DispatchDuringNotification {
                action: "POP_NOTIFICATION"
            }))
        );
        // The flag is cleared once notification ends.
        assert!(ctx.dispatch(Action::PageLoading(false)).is_ok());
    }

    #[test]
    fn test_read_inside_notification_reports_busy() {
        let ctx = FluxContext::new();
        let inner_ctx = ctx.clone();
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let _sub = ctx.subscribe(StoreSet::of(StoreId::PageLoading), move |_| {
            *sink.borrow_mut() = Some(inner_ctx.read(|reader| reader.page_loading().is_loading()));
        });

        ctx.dispatch(Action::PageLoading(true)).unwrap();
        assert_eq!(*result.borrow(), Some(Err(FluxError::StoresBusy)));
    }

    #[test]
    fn test_read_pops_notifications() {
        let ctx = FluxContext::new();
        ctx.dispatch(Action::PushNotification(Notification::error("oops")))
            .unwrap();

        let first = ctx.read(|reader| reader.pop_notification()).unwrap();
        let second = ctx.read(|reader| reader.pop_notification()).unwrap();

        assert_eq!(first, Some(Notification::error("oops")));
        assert_eq!(second, None);
    }

    #[test]
    fn test_subscriber_can_unsubscribe_another_during_notification() {
        let ctx = FluxContext::new();
        let (victim, calls) = recorder(&ctx, StoreSet::of(StoreId::PageLoading));
        let victim = Rc::new(RefCell::new(Some(victim)));
        let slot = Rc::clone(&victim);
        // Registered after the victim, so it runs second; drop it on the first pass.
        let _killer = ctx.subscribe(StoreSet::of(StoreId::PageLoading), move |_| {
            slot.borrow_mut().take();
        });

        ctx.dispatch(Action::PageLoading(true)).unwrap();
        ctx.dispatch(Action::PageLoading(false)).unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert!(victim.borrow().is_none());
        assert_eq!(ctx.listener_count(), 1);
    }

    #[test]
    fn test_request_ids_increase() {
        let ctx = FluxContext::new();
        let a = ctx.next_request_id();
        let b = ctx.next_request_id();
        assert!(b > a);
    }
}
