use core::fmt;

use crate::raw::{Arena, Handle, Node};

/// A read-only view of one node of a [`BTree`](crate::BTree).
///
/// Obtained from [`BTree::root`](crate::BTree::root) and walked with [`child`](Self::child),
/// [`children`](Self::children) and [`parent`](Self::parent). Views borrow the tree, so the
/// tree cannot change while one is live.
pub struct NodeRef<'a, K> {
    nodes: &'a Arena<Node<K>>,
    handle: Handle,
}

impl<'a, K> NodeRef<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, handle: Handle) -> Self {
        NodeRef { nodes, handle }
    }

    fn node(self) -> &'a Node<K> {
        self.nodes.get(self.handle)
    }

    fn at(self, handle: Handle) -> Self {
        NodeRef::new(self.nodes, handle)
    }

    /// The node's keys in ascending order.
    #[must_use]
    pub fn keys(self) -> &'a [K] {
        self.node().keys()
    }

    #[must_use]
    pub fn is_leaf(self) -> bool {
        self.node().is_leaf()
    }

    #[must_use]
    pub fn key_count(self) -> usize {
        self.node().key_count()
    }

    /// Number of children: `key_count() + 1` for an internal node, 0 for a leaf.
    #[must_use]
    pub fn child_count(self) -> usize {
        self.node().child_count()
    }

    /// The child left of key `index`, or right of the last key when `index == key_count()`.
    #[must_use]
    pub fn child(self, index: usize) -> Option<NodeRef<'a, K>> {
        self.node().children().get(index).map(|&child| self.at(child))
    }

    /// The node's children from left to right.
    pub fn children(self) -> impl ExactSizeIterator<Item = NodeRef<'a, K>> {
        self.node().children().iter().map(move |&child| self.at(child))
    }

    /// The node's parent, or `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<NodeRef<'a, K>> {
        self.node().parent().map(|parent| self.at(parent))
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("keys", &self.keys())
            .field("children", &self.child_count())
            .finish()
    }
}
