use super::RawBTree;
use crate::Comparator;
use crate::raw::Handle;
use crate::raw::node::SearchResult;

/// Where a descent for a key ended.
///
/// `Found(i)` names the node holding an equal key, which may be internal. `NotFound(i)` always
/// names a leaf, with `i` the position the key would be inserted at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Location {
    pub(crate) node: Handle,
    pub(crate) position: SearchResult,
}

impl<K, C: Comparator<K>> RawBTree<K, C> {
    /// Descends from the root towards `key`, stopping at the first equal key.
    pub(crate) fn locate(&self, key: &K) -> Location {
        let mut current = self.root;
        loop {
            let node = self.nodes.get(current);
            match node.find_position(key, &self.cmp) {
                SearchResult::NotFound(index) if !node.is_leaf() => current = node.child(index),
                position => {
                    return Location {
                        node: current,
                        position,
                    };
                }
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{NaturalOrder, Order};

    fn order_three(keys: impl IntoIterator<Item = i32>) -> RawBTree<i32, NaturalOrder> {
        let mut tree = RawBTree::new(Order::new(3).unwrap(), NaturalOrder);
        for key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn empty_tree_locates_root_leaf() {
        let tree = order_three([]);
        assert_eq!(
            tree.locate(&1),
            Location {
                node: tree.root(),
                position: SearchResult::NotFound(0)
            }
        );
    }

    #[test]
    fn ties_resolve_at_the_highest_node() {
        // root [4], internals [2] [6], leaves [1] [3] [5] [7]
        let tree = order_three(1..=7);
        assert_eq!(tree.locate(&4).node, tree.root());
        assert_eq!(tree.locate(&4).position, SearchResult::Found(0));

        let two = tree.locate(&2);
        assert_eq!(tree.node(two.node).keys(), &[2]);
        assert!(!tree.node(two.node).is_leaf());
    }

    #[test]
    fn misses_end_in_the_insertion_leaf() {
        let tree = order_three((1..=7).map(|k| k * 10));
        let miss = tree.locate(&55);
        assert!(tree.node(miss.node).is_leaf());
        assert_eq!(tree.node(miss.node).keys(), &[50]);
        assert_eq!(miss.position, SearchResult::NotFound(1));

        let below = tree.locate(&0);
        assert_eq!(below.node, tree.leftmost_leaf(tree.root()));
        assert_eq!(below.position, SearchResult::NotFound(0));
    }
}
