//! Store identity and the store trait.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use super::Action;

/// Identifies one store of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StoreId {
    Account = 0,
    Application = 1,
    Collections = 2,
    Drawer = 3,
    NotificationQueue = 4,
    PageLoading = 5,
    Orders = 6,
}

impl StoreId {
    /// Every store, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Account,
        Self::Application,
        Self::Collections,
        Self::Drawer,
        Self::NotificationQueue,
        Self::PageLoading,
        Self::Orders,
    ];

    /// Store name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Account => "AccountStore",
            Self::Application => "ApplicationStore",
            Self::Collections => "CollectionsStore",
            Self::Drawer => "DrawerStore",
            Self::NotificationQueue => "NotificationQueueStore",
            Self::PageLoading => "PageLoadingStore",
            Self::Orders => "OrdersStore",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// A set of stores, used both for subscriptions and for change reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StoreSet(u8);

impl StoreSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// A set holding a single store.
    #[must_use]
    pub const fn of(id: StoreId) -> Self {
        Self(id.bit())
    }

    /// This set with `id` added.
    #[must_use]
    pub const fn with(self, id: StoreId) -> Self {
        Self(self.0 | id.bit())
    }

    /// Whether `id` is in the set.
    #[must_use]
    pub const fn contains(self, id: StoreId) -> bool {
        self.0 & id.bit() != 0
    }

    /// Whether the two sets share at least one store.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Stores in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = StoreId> {
        StoreId::ALL
            .into_iter()
            .filter(move |id| self.contains(*id))
    }
}

impl BitOr for StoreSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for StoreSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<StoreId> for StoreSet {
    fn from_iter<I: IntoIterator<Item = StoreId>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Debug for StoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(StoreId::name))
            .finish()
    }
}

/// An independently owned unit of application state.
///
/// Stores are mutated only by [`Store::handle`], which the context calls for
/// every dispatched action. A store finishes its mutation before returning,
/// so subscribers notified afterwards always observe a consistent snapshot.
pub trait Store {
    /// Identity of this store.
    const ID: StoreId;

    /// Apply an action. Returns `true` when the store's state changed.
    fn handle(&mut self, action: &Action) -> bool;
}
