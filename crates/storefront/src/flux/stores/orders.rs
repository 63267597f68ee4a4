//! The account's most recent order.

use vitrine_core::Order;

use super::request::LatestRequest;
use crate::flux::{Action, RequestId, Store, StoreId};

/// Holds the signed-in account's last order.
///
/// Same fetch discipline as [`AccountStore`](super::AccountStore): only the
/// latest requested response is applied.
#[derive(Debug, Default)]
pub struct OrdersStore {
    last_order: Option<Order>,
    request: LatestRequest,
}

impl OrdersStore {
    /// The most recent order, or `None` before any order was placed.
    #[must_use]
    pub const fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    #[must_use]
    pub const fn latest_request(&self) -> Option<RequestId> {
        self.request.latest()
    }
}

impl Store for OrdersStore {
    const ID: StoreId = StoreId::Orders;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::LastOrderRequested { request } => {
                self.request.start(*request);
                true
            }
            Action::LastOrderReceived { request, order } => {
                if !self.request.settle(*request, "last order") {
                    return false;
                }
                self.last_order.clone_from(order);
                true
            }
            Action::LastOrderFailed { request, .. } => self.request.settle(*request, "last order"),
            _ => false,
        }
    }
}
