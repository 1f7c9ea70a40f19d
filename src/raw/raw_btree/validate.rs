use core::cmp::Ordering;

use super::RawBTree;
use crate::raw::Handle;
use crate::{Comparator, InvariantViolation};

/// Separators bounding a subtree, exclusive on both sides.
struct Bounds<'a, K> {
    lower: Option<&'a K>,
    upper: Option<&'a K>,
}

/// Running totals of a walk.
#[derive(Default)]
struct Census {
    keys: usize,
    nodes: usize,
    leaf_depth: Option<usize>,
}

impl<K, C: Comparator<K>> RawBTree<K, C> {
    /// Walks the whole tree and reports the first broken structural invariant.
    pub(crate) fn validate(&self) -> Result<(), InvariantViolation> {
        if self.node(self.root).parent().is_some() {
            return Err(InvariantViolation::ParentLink { depth: 0 });
        }

        let mut census = Census::default();
        let unbounded = Bounds {
            lower: None,
            upper: None,
        };
        self.validate_node(self.root, 0, unbounded, &mut census)?;

        if census.keys != self.len {
            return Err(InvariantViolation::Length {
                reported: self.len,
                actual: census.keys,
            });
        }
        if census.nodes != self.nodes.len() {
            return Err(InvariantViolation::Leak {
                allocated: self.nodes.len(),
                reachable: census.nodes,
            });
        }
        Ok(())
    }

    fn validate_node<'a>(
        &'a self,
        handle: Handle,
        depth: usize,
        bounds: Bounds<'a, K>,
        census: &mut Census,
    ) -> Result<(), InvariantViolation> {
        let node = self.node(handle);
        let count = node.key_count();
        census.keys += count;
        census.nodes += 1;

        let is_root = depth == 0;
        let min = match (is_root, node.is_leaf()) {
            (true, true) => 0,
            (true, false) => 1,
            (false, _) => self.order.min_keys(),
        };
        let max = self.order.max_keys();
        if count < min || count > max {
            return Err(InvariantViolation::KeyCount { depth, count, min, max });
        }

        let keys = node.keys();
        if let Some(position) =
            keys.windows(2).position(|pair| self.cmp.compare(&pair[0], &pair[1]) != Ordering::Less)
        {
            return Err(InvariantViolation::KeyOrder {
                depth,
                position: position + 1,
            });
        }

        let below = |key: &K, bound: &K| self.cmp.compare(key, bound) == Ordering::Less;
        for (position, key) in keys.iter().enumerate() {
            let above_lower = bounds.lower.is_none_or(|lower| below(lower, key));
            let below_upper = bounds.upper.is_none_or(|upper| below(key, upper));
            if !(above_lower && below_upper) {
                return Err(InvariantViolation::SubtreeBounds { depth, position });
            }
        }

        if node.is_leaf() {
            return match census.leaf_depth {
                None => {
                    census.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected != depth => Err(InvariantViolation::LeafDepth { depth, expected }),
                Some(_) => Ok(()),
            };
        }

        if node.child_count() != count + 1 {
            return Err(InvariantViolation::ChildCount {
                depth,
                keys: count,
                children: node.child_count(),
            });
        }

        for (slot, &child) in node.children().iter().enumerate() {
            if self.node(child).parent() != Some(handle) {
                return Err(InvariantViolation::ParentLink { depth: depth + 1 });
            }
            let child_bounds = Bounds {
                lower: slot.checked_sub(1).map(|i| node.key(i)).or(bounds.lower),
                upper: keys.get(slot).or(bounds.upper),
            };
            self.validate_node(child, depth + 1, child_bounds, census)?;
        }
        Ok(())
    }
}
