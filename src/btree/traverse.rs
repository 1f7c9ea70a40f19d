use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Arena, Handle, Node};

// Frames kept inline; a tree of order 3 needs more than this only past a few million keys.
const INLINE_DEPTH: usize = 16;

/// A lazy in-order traversal of the keys of a [`BTree`](crate::BTree).
///
/// This `struct` is created by the [`traverse`] and [`iter`] methods on [`BTree`]. See their
/// documentation for more.
///
/// [`BTree`]: crate::BTree
/// [`traverse`]: crate::BTree::traverse
/// [`iter`]: crate::BTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Traverse<'a, K> {
    nodes: &'a Arena<Node<K>>,
    /// Path from the root to the current node; each frame holds the next key index to yield.
    stack: SmallVec<[(Handle, usize); INLINE_DEPTH]>,
    remaining: usize,
}

impl<'a, K> Traverse<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Handle, len: usize) -> Self {
        let mut traverse = Traverse {
            nodes,
            stack: SmallVec::new(),
            remaining: len,
        };
        traverse.descend(root);
        traverse
    }

    /// Pushes the path from `from` to its leftmost leaf.
    fn descend(&mut self, from: Handle) {
        let mut current = from;
        loop {
            self.stack.push((current, 0));
            let node = self.nodes.get(current);
            if node.is_leaf() {
                return;
            }
            current = node.child(0);
        }
    }
}

impl<'a, K> Iterator for Traverse<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let nodes = self.nodes;
        loop {
            let (handle, index) = self.stack.pop()?;
            let node = nodes.get(handle);
            if index < node.key_count() {
                self.stack.push((handle, index + 1));
                if !node.is_leaf() {
                    self.descend(node.child(index + 1));
                }
                self.remaining -= 1;
                return Some(node.key(index));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Traverse<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Traverse<'_, K> {}

impl<K> Clone for Traverse<'_, K> {
    fn clone(&self) -> Self {
        Traverse {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Traverse<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::BTree;
    use alloc::format;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn empty_tree_yields_nothing() {
        let tree: BTree<u8> = BTree::new(3).unwrap();
        let mut keys = tree.traverse();
        assert_eq!(keys.len(), 0);
        assert_eq!(keys.next(), None);
        assert_eq!(keys.next(), None);
    }

    #[test]
    fn clone_restarts_from_the_same_point() {
        let mut tree = BTree::new(3).unwrap();
        tree.extend(1..=10);
        let mut keys = tree.traverse();
        assert_eq!(keys.nth(3), Some(&4));
        let rest = keys.clone();
        assert_eq!(keys.copied().collect::<Vec<_>>(), (5..=10).collect::<Vec<_>>());
        assert_eq!(rest.len(), 6);
        assert_eq!(format!("{rest:?}"), "[5, 6, 7, 8, 9, 10]");
    }

    proptest! {
        #[test]
        fn visits_keys_in_ascending_order(
            order in 3usize..10,
            keys in prop::collection::btree_set(any::<i16>(), 0..300),
        ) {
            let mut tree = BTree::new(order).unwrap();
            for &key in keys.iter().rev() {
                tree.insert(key);
            }

            let mut traverse = tree.traverse();
            for (seen, expected) in keys.iter().enumerate() {
                prop_assert_eq!(traverse.len(), keys.len() - seen);
                prop_assert_eq!(traverse.next(), Some(expected));
            }
            prop_assert_eq!(traverse.next(), None);
        }
    }
}
