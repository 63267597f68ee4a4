//! Navigation collections and the collections tree.

use serde::{Deserialize, Serialize};

use super::{CollectionId, LocalizedText};

/// A collection that can appear in navigation menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationCollection {
    pub id: CollectionId,
    pub name: LocalizedText,
}

/// A node of the collections hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionNode {
    pub id: CollectionId,
    #[serde(default)]
    pub children: Vec<CollectionNode>,
}

/// Hierarchical grouping of collections.
///
/// The presentation layer passes it through to the header untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionsTree(Vec<CollectionNode>);

impl CollectionsTree {
    /// Build a tree from its root nodes.
    #[must_use]
    pub const fn new(roots: Vec<CollectionNode>) -> Self {
        Self(roots)
    }

    /// Root nodes, in order.
    #[must_use]
    pub fn roots(&self) -> &[CollectionNode] {
        &self.0
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Depth-first iterator over all collection ids in the tree.
    pub fn ids(&self) -> impl Iterator<Item = &CollectionId> {
        let mut stack: Vec<&CollectionNode> = self.0.iter().rev().collect();
        core::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(&node.id)
        })
    }
}
