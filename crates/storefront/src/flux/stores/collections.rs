//! Collections used for navigation.

use vitrine_core::{CollectionId, CollectionsTree, NavigationCollection};

use crate::flux::{Action, Store, StoreId};

#[derive(Debug, Default)]
pub struct CollectionsStore {
    collections: Vec<NavigationCollection>,
    main_navigation: Vec<CollectionId>,
    tree: CollectionsTree,
}

impl CollectionsStore {
    /// Collections listed in the main navigation, in menu order.
    ///
    /// Menu entries that reference an unknown collection are skipped.
    #[must_use]
    pub fn main_navigation_collections(&self) -> Vec<NavigationCollection> {
        self.main_navigation
            .iter()
            .filter_map(|id| self.collection(id).cloned())
            .collect()
    }

    #[must_use]
    pub const fn collections_tree(&self) -> &CollectionsTree {
        &self.tree
    }

    /// Look up a collection by id.
    #[must_use]
    pub fn collection(&self, id: &CollectionId) -> Option<&NavigationCollection> {
        self.collections.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn collections(&self) -> &[NavigationCollection] {
        &self.collections
    }
}

impl Store for CollectionsStore {
    const ID: StoreId = StoreId::Collections;

    fn handle(&mut self, action: &Action) -> bool {
        match action {
            Action::ReceiveCollections {
                collections,
                main_navigation,
                tree,
            } => {
                self.collections.clone_from(collections);
                self.main_navigation.clone_from(main_navigation);
                self.tree = tree.clone();
                true
            }
            _ => false,
        }
    }
}
