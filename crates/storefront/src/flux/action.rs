//! Actions: the only way store state changes.

use vitrine_core::{
    Account, CollectionId, CollectionsTree, Drawer, NavigationCollection, Notification, Order,
};

/// Identifier tagging one asynchronous request and its response actions.
///
/// Ids are handed out in increasing order by
/// [`FluxContext::next_request_id`](super::FluxContext::next_request_id), so
/// a store can tell a stale response from the latest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Create a request id from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// A named intent dispatched by view code or by asynchronous action helpers.
///
/// Each store decides for itself which actions it reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the given drawer, or close all drawers with `None`.
    TriggerDrawer(Option<Drawer>),
    /// Queue a notification for display.
    PushNotification(Notification),
    /// The displayed notification was dismissed.
    PopNotification,
    /// Set the global page loading flag.
    PageLoading(bool),
    /// A route change started. Shows the loader and closes any open drawer.
    Navigate { path: String },
    /// Collections data arrived from the catalog.
    ReceiveCollections {
        collections: Vec<NavigationCollection>,
        main_navigation: Vec<CollectionId>,
        tree: CollectionsTree,
    },
    /// An account details fetch was started.
    AccountDetailsRequested { request: RequestId },
    /// An account details fetch completed. `None` means anonymous.
    AccountDetailsReceived {
        request: RequestId,
        account: Option<Account>,
    },
    /// An account details fetch failed.
    AccountDetailsFailed { request: RequestId, reason: String },
    /// A fetch of the account's most recent order was started.
    LastOrderRequested { request: RequestId },
    /// The last order fetch completed. `None` means no order was placed yet.
    LastOrderReceived {
        request: RequestId,
        order: Option<Order>,
    },
    /// The last order fetch failed.
    LastOrderFailed { request: RequestId, reason: String },
}

impl Action {
    /// Stable action name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TriggerDrawer(_) => "TRIGGER_DRAWER",
            Self::PushNotification(_) => "PUSH_NOTIFICATION",
            Self::PopNotification => "POP_NOTIFICATION",
            Self::PageLoading(_) => "PAGE_LOADING",
            Self::Navigate { .. } => "NAVIGATE",
            Self::ReceiveCollections { .. } => "RECEIVE_COLLECTIONS",
            Self::AccountDetailsRequested { .. } => "ACCOUNT_DETAILS_REQUESTED",
            Self::AccountDetailsReceived { .. } => "ACCOUNT_DETAILS_RECEIVED",
            Self::AccountDetailsFailed { .. } => "ACCOUNT_DETAILS_FAILED",
            Self::LastOrderRequested { .. } => "LAST_ORDER_REQUESTED",
            Self::LastOrderReceived { .. } => "LAST_ORDER_RECEIVED",
            Self::LastOrderFailed { .. } => "LAST_ORDER_FAILED",
        }
    }
}
