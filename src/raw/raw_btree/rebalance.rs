use tracing::{debug, trace};

use super::RawBTree;
use crate::raw::Handle;
use crate::raw::node::{Node, Side};

impl<K, C> RawBTree<K, C> {
    /// Repairs underflow starting at `handle`, walking towards the root.
    ///
    /// An underflowing node borrows through its parent from an adjacent sibling that has a key
    /// to spare (left first, then right) and the repair stops there. Otherwise it merges with a
    /// sibling (left when there is one), the parent loses a key, and the walk continues with the
    /// parent. An internal root left without keys is replaced by its only child.
    pub(super) fn rebalance_upward(&mut self, mut handle: Handle) {
        let min_keys = self.order.min_keys();
        loop {
            let node = self.node(handle);
            let Some(parent) = node.parent() else {
                self.collapse_root();
                return;
            };
            if node.key_count() >= min_keys {
                return;
            }

            let slot = self.child_slot(parent, handle);
            let siblings = self.node(parent);
            let left = slot.checked_sub(1).map(|i| siblings.child(i));
            let right = (slot + 1 < siblings.child_count()).then(|| siblings.child(slot + 1));

            if let Some(left) = left.filter(|&s| self.is_populous(s)) {
                self.borrow(parent, slot - 1, left, handle, Side::Left);
                return;
            }
            if let Some(right) = right.filter(|&s| self.is_populous(s)) {
                self.borrow(parent, slot, handle, right, Side::Right);
                return;
            }

            match (left, right) {
                (Some(left), _) => self.merge(parent, slot - 1, left, handle),
                (None, Some(right)) => self.merge(parent, slot, handle, right),
                (None, None) => panic!("`RawBTree::rebalance_upward()` - `{handle:?}` has no siblings!"),
            }
            handle = parent;
        }
    }

    /// A sibling is populous when it can give up a key and stay legal.
    fn is_populous(&self, handle: Handle) -> bool {
        self.node(handle).key_count() > self.order.min_keys()
    }

    /// Redistributes `left`, the separator at `separator` in `parent`, and `right` around their
    /// combined lower median. `lender` names the sibling that had keys to spare.
    fn borrow(&mut self, parent: Handle, separator: usize, left: Handle, right: Handle, lender: Side) {
        let pivot = self.nodes.get_mut(parent).remove_key(separator);
        let (left_node, right_node) = self.nodes.pair_mut(left, right);
        let pivot = Node::redistribute(left_node, pivot, right_node);
        let (left_keys, right_keys) = (left_node.key_count(), right_node.key_count());
        let internal = !left_node.is_leaf();
        self.nodes.get_mut(parent).insert_key(separator, pivot);

        if internal {
            self.adopt_children(left);
            self.adopt_children(right);
        }
        trace!(parent = ?parent, lender = ?lender, left_keys, right_keys, "borrowed through separator");
    }

    /// Folds `right` and the separator at `separator` into `left`, dropping `right`.
    fn merge(&mut self, parent: Handle, separator: usize, left: Handle, right: Handle) {
        let (pivot, removed) = self.nodes.get_mut(parent).remove_key_and_child(separator, Side::Right);
        debug_assert_eq!(removed, right, "separator's right child must be the merged sibling");

        let right_node = self.nodes.take(right);
        let internal = !right_node.is_leaf();
        let left_node = self.nodes.get_mut(left);
        left_node.absorb(pivot, right_node);
        let merged_keys = left_node.key_count();

        if internal {
            self.adopt_children(left);
        }
        trace!(parent = ?parent, node = ?left, merged_keys, "merged siblings");
    }

    /// Promotes the only child of a key-less internal root.
    fn collapse_root(&mut self) {
        let root = self.node(self.root);
        if root.key_count() > 0 || root.is_leaf() {
            return;
        }
        let child = root.child(0);
        self.nodes.take(self.root);
        self.nodes.get_mut(child).set_parent(None);
        self.root = child;
        debug!(height = self.height(), "root collapsed; tree shrank a level");
    }
}
