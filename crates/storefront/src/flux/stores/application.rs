//! Application-wide bookkeeping: the current route and element keys.

use crate::flux::{Action, Store, StoreId};

#[derive(Debug, Default)]
pub struct ApplicationStore {
    current_path: Option<String>,
    next_id: u64,
}

impl ApplicationStore {
    /// Path of the last route change, if any.
    #[must_use]
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    /// Hand out a fresh key. Keys increase monotonically and are never reused.
    pub const fn unique_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Store for ApplicationStore {
    const ID: StoreId = StoreId::Application;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::Navigate { path } => {
                self.current_path = Some(path.clone());
                true
            }
            _ => false,
        }
    }
}
