use core::mem;

use smallvec::SmallVec;

use super::handle::Handle;
use crate::Comparator;

// Keys stored inline before a node spills to the heap. Orders up to 8 never allocate per node.
pub(crate) const INLINE_KEYS: usize = 8;

pub(crate) type Keys<K> = SmallVec<[K; INLINE_KEYS]>;
pub(crate) type Children = SmallVec<[Handle; INLINE_KEYS + 1]>;

/// Returns the split point of a run of `len` keys.
///
/// The lower median is used everywhere so that overflow splits and underflow borrows agree for
/// even lengths.
#[inline]
pub(crate) const fn median_index(len: usize) -> usize {
    (len - 1) / 2
}

/// Result of searching for a key in a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchResult {
    /// Key was found at the given index.
    Found(usize),
    /// Key was not found; index is where it would be inserted, and also the child to descend.
    NotFound(usize),
}

/// Which child of a key a structural edit applies to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// One tree node. A node with no children is a leaf; otherwise it has `keys.len() + 1` children.
#[derive(Clone)]
pub(crate) struct Node<K> {
    keys: Keys<K>,
    children: Children,
    parent: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a new empty leaf node.
    pub(crate) fn new_leaf() -> Self {
        Self {
            keys: SmallVec::new(),
            children: SmallVec::new(),
            parent: None,
        }
    }

    /// Creates a root holding exactly `key` between `left` and `right`.
    pub(crate) fn new_root(key: K, left: Handle, right: Handle) -> Self {
        let mut keys = SmallVec::new();
        keys.push(key);
        let mut children = SmallVec::new();
        children.push(left);
        children.push(right);
        Self {
            keys,
            children,
            parent: None,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub(crate) fn key(&self, index: usize) -> &K {
        &self.keys[index]
    }

    pub(crate) fn key_mut(&mut self, index: usize) -> &mut K {
        &mut self.keys[index]
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline]
    pub(crate) fn child(&self, index: usize) -> Handle {
        self.children[index]
    }

    pub(crate) fn children(&self) -> &[Handle] {
        &self.children
    }

    /// Returns the slot `child` occupies among this node's children.
    pub(crate) fn child_index(&self, child: Handle) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }

    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    /// Binary-searches this node's keys with `cmp`.
    #[inline]
    pub(crate) fn find_position<C>(&self, key: &K, cmp: &C) -> SearchResult
    where
        C: Comparator<K> + ?Sized,
    {
        match self.keys.binary_search_by(|probe| cmp.compare(probe, key)) {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::NotFound(index),
        }
    }

    /// Inserts a key without touching the children.
    pub(crate) fn insert_key(&mut self, index: usize, key: K) {
        self.keys.insert(index, key);
    }

    /// Removes a key without touching the children.
    pub(crate) fn remove_key(&mut self, index: usize) -> K {
        self.keys.remove(index)
    }

    /// Inserts `key` at `index` with `child` as its right child.
    pub(crate) fn insert_key_and_right_child(&mut self, index: usize, key: K, child: Handle) {
        self.keys.insert(index, key);
        self.children.insert(index + 1, child);
    }

    /// Removes the key at `index` together with its left or right child.
    pub(crate) fn remove_key_and_child(&mut self, index: usize, side: Side) -> (K, Handle) {
        let key = self.keys.remove(index);
        let child = match side {
            Side::Left => self.children.remove(index),
            Side::Right => self.children.remove(index + 1),
        };
        (key, child)
    }

    /// Splits this node around `keys[mid]`.
    ///
    /// This node keeps `keys[..mid]` and `children[..=mid]`; the returned node gets
    /// `keys[mid + 1..]` and `children[mid + 1..]` and the same parent. The median is returned
    /// for the caller to place in the parent.
    pub(crate) fn split_at(&mut self, mid: usize) -> (K, Node<K>) {
        let keys: Keys<K> = self.keys.drain(mid + 1..).collect();
        let median = self.keys.remove(mid);
        let children: Children = if self.is_leaf() {
            SmallVec::new()
        } else {
            self.children.drain(mid + 1..).collect()
        };
        let right = Node {
            keys,
            children,
            parent: self.parent,
        };
        (median, right)
    }

    /// Appends `separator` and everything in `right` to this node.
    pub(crate) fn absorb(&mut self, separator: K, mut right: Node<K>) {
        self.keys.push(separator);
        self.keys.append(&mut right.keys);
        self.children.append(&mut right.children);
    }

    /// Rebalances two adjacent siblings through their separator.
    ///
    /// `left`, `separator` and `right` are treated as one ordered run whose lower median becomes
    /// the new separator (returned); everything before it goes to `left`, everything after it to
    /// `right`. Children follow their keys.
    pub(crate) fn redistribute(left: &mut Node<K>, separator: K, right: &mut Node<K>) -> K {
        let mut keys = mem::take(&mut left.keys);
        keys.push(separator);
        keys.append(&mut right.keys);
        let mut children = mem::take(&mut left.children);
        children.append(&mut right.children);

        let mid = median_index(keys.len());
        right.keys = keys.drain(mid + 1..).collect();
        let separator = keys.remove(mid);
        left.keys = keys;
        if !children.is_empty() {
            right.children = children.drain(mid + 1..).collect();
        }
        left.children = children;
        separator
    }
}
