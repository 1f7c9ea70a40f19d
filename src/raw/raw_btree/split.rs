use tracing::{debug, trace};

use super::RawBTree;
use crate::raw::Handle;
use crate::raw::node::{Node, median_index};

impl<K, C> RawBTree<K, C> {
    /// Repairs overflow starting at `handle`, walking towards the root.
    ///
    /// Each overflowing node keeps the keys below its lower median, a new right sibling takes
    /// the keys above it, and the median moves into the parent. A root split adds a level.
    pub(super) fn split_upward(&mut self, mut handle: Handle) {
        let max_keys = self.order.max_keys();
        while self.node(handle).key_count() > max_keys {
            let node = self.nodes.get_mut(handle);
            let (median, right) = node.split_at(median_index(node.key_count()));
            let parent = node.parent();
            let (left_keys, right_keys) = (node.key_count(), right.key_count());
            let right_is_leaf = right.is_leaf();

            let right_handle = self.nodes.alloc(right);
            if !right_is_leaf {
                self.adopt_children(right_handle);
            }
            trace!(node = ?handle, right = ?right_handle, left_keys, right_keys, "split node");

            let Some(parent) = parent else {
                let root = self.nodes.alloc(Node::new_root(median, handle, right_handle));
                self.nodes.get_mut(handle).set_parent(Some(root));
                self.nodes.get_mut(right_handle).set_parent(Some(root));
                self.root = root;
                debug!(height = self.height(), "root split; tree grew a level");
                return;
            };

            let slot = self.child_slot(parent, handle);
            self.nodes.get_mut(parent).insert_key_and_right_child(slot, median, right_handle);
            handle = parent;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{NaturalOrder, Order};

    fn build(order: usize, keys: impl IntoIterator<Item = i32>) -> RawBTree<i32, NaturalOrder> {
        let mut tree = RawBTree::new(Order::new(order).unwrap(), NaturalOrder);
        for key in keys {
            tree.insert(key);
            tree.validate().unwrap();
        }
        tree
    }

    fn level(tree: &RawBTree<i32, NaturalOrder>, handle: Handle) -> Vec<Vec<i32>> {
        tree.node(handle).children().iter().map(|&c| tree.node(c).keys().to_vec()).collect()
    }

    #[test]
    fn even_order_root_split_uses_lower_median() {
        let tree = build(4, [10, 20, 30, 40]);
        let root = tree.root();
        assert_eq!(tree.node(root).keys(), &[20]);
        assert_eq!(level(&tree, root), [vec![10], vec![30, 40]]);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn leaf_split_inserts_median_into_parent() {
        let tree = build(5, 1..=8);
        let root = tree.root();
        assert_eq!(tree.node(root).keys(), &[3, 6]);
        assert_eq!(level(&tree, root), [vec![1, 2], vec![4, 5], vec![7, 8]]);
    }

    #[test]
    fn cascading_split_grows_one_level() {
        // Order 5 with 1..=16: root [3 6 9 12], last leaf [13 14 15 16]. Inserting 17 splits
        // the leaf and then the root.
        let mut tree = build(5, 1..=16);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node(tree.root()).key_count(), 4);

        tree.insert(17);
        tree.validate().unwrap();
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.node(tree.root()).keys(), &[9]);
    }

    #[test]
    fn split_children_point_at_their_new_parent() {
        let tree = build(3, 1..=20);
        let root = tree.root();
        for &child in tree.node(root).children() {
            assert_eq!(tree.node(child).parent(), Some(root));
            for &grandchild in tree.node(child).children() {
                assert_eq!(tree.node(grandchild).parent(), Some(child));
            }
        }
    }
}
