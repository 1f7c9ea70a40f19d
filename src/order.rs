use core::fmt;

use crate::ConfigError;

/// The branching factor of a tree.
///
/// A node of an order-`M` tree holds at most `M - 1` keys and `M` children. Every node other
/// than the root holds at least `(M - 1) / 2` keys. Even orders are supported.
///
/// # Examples
///
/// ```
/// use ordtree::Order;
///
/// let order = Order::new(4).unwrap();
/// assert_eq!(order.max_keys(), 3);
/// assert_eq!(order.min_keys(), 1);
/// assert!(Order::new(2).is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Order(usize);

impl Order {
    /// The smallest usable order.
    pub const MIN: usize = 3;

    /// The order used by [`BTree::default`](crate::BTree::default).
    pub const DEFAULT: Order = Order(128);

    /// Validates `order` as a branching factor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OrderTooSmall`] if `order < 3`.
    pub const fn new(order: usize) -> Result<Self, ConfigError> {
        if order < Self::MIN {
            return Err(ConfigError::OrderTooSmall {
                order,
                min: Self::MIN,
            });
        }
        Ok(Self(order))
    }

    /// Returns the order as a plain number.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Maximum number of children of any node.
    #[must_use]
    pub const fn max_children(self) -> usize {
        self.0
    }

    /// Maximum number of keys of any node.
    #[must_use]
    pub const fn max_keys(self) -> usize {
        self.0 - 1
    }

    /// Minimum number of keys of any node but the root.
    #[must_use]
    pub const fn min_keys(self) -> usize {
        (self.0 - 1) / 2
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for Order {
    type Error = ConfigError;

    fn try_from(order: usize) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl From<Order> for usize {
    fn from(order: Order) -> Self {
        order.0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_degenerate_orders() {
        for order in 0..Order::MIN {
            assert_eq!(
                Order::new(order),
                Err(ConfigError::OrderTooSmall {
                    order,
                    min: 3
                })
            );
        }
    }

    #[test]
    fn even_and_odd_bounds() {
        let four = Order::new(4).unwrap();
        assert_eq!((four.min_keys(), four.max_keys(), four.max_children()), (1, 3, 4));

        let five = Order::new(5).unwrap();
        assert_eq!((five.min_keys(), five.max_keys(), five.max_children()), (2, 4, 5));

        let three = Order::try_from(3).unwrap();
        assert_eq!((three.min_keys(), three.max_keys()), (1, 2));
    }

    #[test]
    fn default_is_production_order() {
        assert_eq!(Order::default().get(), 128);
        assert_eq!(usize::from(Order::default()), 128);
    }

    proptest! {
        // A merge concatenates a minimal sibling, the separator and an underflowed node;
        // the result must still fit in one node.
        #[test]
        fn merged_node_fits(order in 3usize..512) {
            let order = Order::new(order).unwrap();
            let merged = order.min_keys() + 1 + (order.min_keys() - 1);
            prop_assert!(merged <= order.max_keys());
        }

        // Splitting an overflowing node at the lower median leaves both halves legal.
        #[test]
        fn split_halves_are_legal(order in 3usize..512) {
            let order = Order::new(order).unwrap();
            let overflow = order.max_keys() + 1;
            let mid = (overflow - 1) / 2;
            let right = overflow - mid - 1;
            prop_assert!(mid >= order.min_keys() && mid <= order.max_keys());
            prop_assert!(right >= order.min_keys() && right <= order.max_keys());
        }
    }
}
