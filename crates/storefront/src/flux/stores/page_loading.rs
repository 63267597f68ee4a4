//! Global page loading flag.

use crate::flux::{Action, Store, StoreId};

#[derive(Debug, Default)]
pub struct PageLoadingStore {
    loading: bool,
}

impl PageLoadingStore {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    fn set(&mut self, loading: bool) -> bool {
        let changed = self.loading != loading;
        self.loading = loading;
        changed
    }
}

impl Store for PageLoadingStore {
    const ID: StoreId = StoreId::PageLoading;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::PageLoading(loading) => self.set(*loading),
            Action::Navigate { .. } => self.set(true),
            _ => false,
        }
    }
}
