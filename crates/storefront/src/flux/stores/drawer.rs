//! Which side drawer is open.

use vitrine_core::Drawer;

use crate::flux::{Action, Store, StoreId};

/// Holds the opened drawer. Drawers are exclusive: opening one replaces
/// whichever was open before.
#[derive(Debug, Default)]
pub struct DrawerStore {
    opened: Option<Drawer>,
}

impl DrawerStore {
    /// The open drawer, or `None` when all drawers are closed.
    #[must_use]
    pub const fn opened_drawer(&self) -> Option<Drawer> {
        self.opened
    }

    fn set(&mut self, drawer: Option<Drawer>) -> bool {
        let changed = self.opened != drawer;
        self.opened = drawer;
        changed
    }
}

impl Store for DrawerStore {
    const ID: StoreId = StoreId::Drawer;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::TriggerDrawer(drawer) => self.set(*drawer),
            Action::Navigate { .. } => self.set(None),
            _ => false,
        }
    }
}
