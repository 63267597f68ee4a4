//! The signed-in account.

use vitrine_core::{Account, Role};

use super::request::LatestRequest;
use crate::flux::{Action, RequestId, Store, StoreId};

/// Holds the current account and tracks the latest account details request.
///
/// Fetches are fire-and-forget and may complete out of order. Only the
/// response to the most recently requested fetch is applied; responses to
/// older requests are dropped.
#[derive(Debug, Default)]
pub struct AccountStore {
    account: Option<Account>,
    request: LatestRequest,
}

impl AccountStore {
    /// The signed-in account, or `None` when anonymous.
    #[must_use]
    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Whether the current account holds any of the given roles.
    /// Anonymous visitors are never authorized.
    #[must_use]
    pub fn is_authorized(&self, roles: &[Role]) -> bool {
        self.account
            .as_ref()
            .is_some_and(|account| account.has_any_role(roles))
    }

    /// Whether an account details fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// The most recently requested fetch, if any.
    #[must_use]
    pub const fn latest_request(&self) -> Option<RequestId> {
        self.request.latest()
    }
}

impl Store for AccountStore {
    const ID: StoreId = StoreId::Account;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::AccountDetailsRequested { request } => {
                self.request.start(*request);
                true
            }
            Action::AccountDetailsReceived { request, account } => {
                if !self.request.settle(*request, "account details") {
                    return false;
                }
                self.account.clone_from(account);
                true
            }
            Action::AccountDetailsFailed { request, .. } => {
                self.request.settle(*request, "account details")
            }
            _ => false,
        }
    }
}
