use thiserror::Error;

/// Error returned when a tree is configured with an unusable order.
///
/// # Examples
///
/// ```
/// use ordtree::{BTree, ConfigError};
///
/// let err = BTree::<i32>::new(2).unwrap_err();
/// assert_eq!(err, ConfigError::OrderTooSmall { order: 2, min: 3 });
/// assert_eq!(err.to_string(), "B-tree order must be at least 3, got 2");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum ConfigError {
    /// Orders 1 and 2 cannot hold a separator key and still split.
    #[error("B-tree order must be at least {min}, got {order}")]
    OrderTooSmall { order: usize, min: usize },
}

/// A broken structural invariant, reported by [`BTree::validate`](crate::BTree::validate).
///
/// Depths are counted from the root, which sits at depth 0. Positions are zero-based key
/// indexes within the offending node.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum InvariantViolation {
    #[error("node at depth {depth} holds {count} keys, outside {min}..={max}")]
    KeyCount { depth: usize, count: usize, min: usize, max: usize },

    #[error("internal node at depth {depth} has {children} children for {keys} keys")]
    ChildCount { depth: usize, keys: usize, children: usize },

    #[error("leaf at depth {depth}, but the first leaf found is at depth {expected}")]
    LeafDepth { depth: usize, expected: usize },

    #[error("keys at depth {depth} are not strictly increasing at position {position}")]
    KeyOrder { depth: usize, position: usize },

    #[error("key at depth {depth} position {position} falls outside its parent's separators")]
    SubtreeBounds { depth: usize, position: usize },

    #[error("node at depth {depth} does not link back to its parent")]
    ParentLink { depth: usize },

    #[error("tree reports {reported} keys but holds {actual}")]
    Length { reported: usize, actual: usize },

    #[error("arena holds {allocated} nodes but only {reachable} are reachable from the root")]
    Leak { allocated: usize, reachable: usize },
}
