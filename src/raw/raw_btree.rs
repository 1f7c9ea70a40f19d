use core::mem;

use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Children, Node, SearchResult};
use crate::{Comparator, Order};

mod locate;
mod rebalance;
mod split;
mod validate;

pub(crate) use locate::Location;

/// The core B-tree implementation backing `BTree`.
#[derive(Clone)]
pub(crate) struct RawBTree<K, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node. An empty tree is a root leaf with no keys.
    root: Handle,
    /// Total number of keys in the tree.
    len: usize,
    order: Order,
    cmp: C,
}

impl<K, C> RawBTree<K, C> {
    /// Creates a new tree holding only an empty root leaf.
    pub(crate) fn new(order: Order, cmp: C) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new_leaf());
        Self {
            nodes,
            root,
            len: 0,
            order,
            cmp,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn order(&self) -> Order {
        self.order
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) const fn root(&self) -> Handle {
        self.root
    }

    pub(crate) const fn nodes(&self) -> &Arena<Node<K>> {
        &self.nodes
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    /// Number of levels; a tree that is a single (possibly empty) leaf has height 1.
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.node(self.root);
        while !current.is_leaf() {
            current = self.node(current.child(0));
            height += 1;
        }
        height
    }

    /// Drops every key, leaving a fresh empty root leaf.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::new_leaf());
        self.len = 0;
    }

    /// Follows first children from `from` down to a leaf.
    pub(crate) fn leftmost_leaf(&self, from: Handle) -> Handle {
        let mut current = from;
        loop {
            let node = self.node(current);
            if node.is_leaf() {
                return current;
            }
            current = node.child(0);
        }
    }

    /// Follows last children from `from` down to a leaf.
    pub(crate) fn rightmost_leaf(&self, from: Handle) -> Handle {
        let mut current = from;
        loop {
            let node = self.node(current);
            if node.is_leaf() {
                return current;
            }
            current = node.child(node.child_count() - 1);
        }
    }

    pub(crate) fn first(&self) -> Option<&K> {
        self.node(self.leftmost_leaf(self.root)).keys().first()
    }

    pub(crate) fn last(&self) -> Option<&K> {
        self.node(self.rightmost_leaf(self.root)).keys().last()
    }

    /// Removes the smallest key. It always sits in the leftmost leaf.
    pub(crate) fn pop_first(&mut self) -> Option<K> {
        let leaf = self.leftmost_leaf(self.root);
        if self.node(leaf).key_count() == 0 {
            return None;
        }
        let key = self.nodes.get_mut(leaf).remove_key(0);
        self.len -= 1;
        self.rebalance_upward(leaf);
        Some(key)
    }

    /// Removes the largest key. It always sits in the rightmost leaf.
    pub(crate) fn pop_last(&mut self) -> Option<K> {
        let leaf = self.rightmost_leaf(self.root);
        let count = self.node(leaf).key_count();
        if count == 0 {
            return None;
        }
        let key = self.nodes.get_mut(leaf).remove_key(count - 1);
        self.len -= 1;
        self.rebalance_upward(leaf);
        Some(key)
    }

    /// Returns the slot `child` occupies in `parent`.
    fn child_slot(&self, parent: Handle, child: Handle) -> usize {
        match self.node(parent).child_index(child) {
            Some(slot) => slot,
            None => panic!("`RawBTree::child_slot()` - `{child:?}` is not a child of `{parent:?}`!"),
        }
    }

    /// Points every child of `handle` back at `handle`.
    fn adopt_children(&mut self, handle: Handle) {
        let children: Children = self.node(handle).children().iter().copied().collect();
        for child in children {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
    }
}

impl<K, C: Comparator<K>> RawBTree<K, C> {
    /// Returns the stored key equal to `key`, if any.
    pub(crate) fn get(&self, key: &K) -> Option<&K> {
        let Location {
            node,
            position,
        } = self.locate(key);
        match position {
            SearchResult::Found(index) => Some(self.node(node).key(index)),
            SearchResult::NotFound(_) => None,
        }
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `key` unless an equal key is present. Returns whether the tree changed.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let Location {
            node,
            position,
        } = self.locate(&key);
        match position {
            SearchResult::Found(_) => false,
            SearchResult::NotFound(index) => {
                self.insert_into_leaf(node, index, key);
                true
            }
        }
    }

    /// Inserts `key`, overwriting an equal key in place. Returns the displaced key.
    pub(crate) fn replace(&mut self, key: K) -> Option<K> {
        let Location {
            node,
            position,
        } = self.locate(&key);
        match position {
            SearchResult::Found(index) => Some(mem::replace(self.nodes.get_mut(node).key_mut(index), key)),
            SearchResult::NotFound(index) => {
                self.insert_into_leaf(node, index, key);
                None
            }
        }
    }

    fn insert_into_leaf(&mut self, leaf: Handle, index: usize, key: K) {
        let node = self.nodes.get_mut(leaf);
        node.insert_key(index, key);
        self.len += 1;
        if node.key_count() > self.order.max_keys() {
            self.split_upward(leaf);
        }
    }

    /// Removes the key equal to `key` and returns it.
    ///
    /// A key found in an internal node is overwritten by its successor (the first key of the
    /// leftmost leaf under its right child) and the successor's leaf slot is removed instead,
    /// so the structural removal always happens at a leaf.
    pub(crate) fn remove(&mut self, key: &K) -> Option<K> {
        let Location {
            node,
            position: SearchResult::Found(index),
        } = self.locate(key)
        else {
            return None;
        };

        let (leaf, removed) = if self.node(node).is_leaf() {
            (node, self.nodes.get_mut(node).remove_key(index))
        } else {
            let leaf = self.leftmost_leaf(self.node(node).child(index + 1));
            let successor = self.nodes.get_mut(leaf).remove_key(0);
            let removed = mem::replace(self.nodes.get_mut(node).key_mut(index), successor);
            trace!(node = ?node, leaf = ?leaf, "replaced internal key with its successor");
            (leaf, removed)
        };

        self.len -= 1;
        self.rebalance_upward(leaf);
        Some(removed)
    }
}
