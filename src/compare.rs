use core::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// A tree is built with one comparator and uses it for every search, insertion and removal.
/// It is a logic error for a comparator to be inconsistent over the keys stored in a tree
/// (for example `compare(a, b) == Less` while `compare(b, a) == Less`). The behavior resulting
/// from such a logic error is not specified, but will be encapsulated to the `BTree` that
/// observed it and not result in undefined behavior.
///
/// Any `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use core::cmp::Ordering;
/// use ordtree::Comparator;
///
/// let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
/// assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// The comparator that orders keys by their [`Ord`] implementation.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use ordtree::{Comparator, NaturalOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sort_with<C: Comparator<i32>>(cmp: &C, mut keys: [i32; 4]) -> [i32; 4] {
        keys.sort_by(|a, b| cmp.compare(a, b));
        keys
    }

    #[test]
    fn natural_order_matches_ord() {
        assert_eq!(NaturalOrder.compare(&"a", &"b"), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&7, &7), Ordering::Equal);
        assert_eq!(sort_with(&NaturalOrder, [3, 1, 4, 2]), [1, 2, 3, 4]);
    }

    #[test]
    fn closures_are_comparators() {
        let descending = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(sort_with(&descending, [3, 1, 4, 2]), [4, 3, 2, 1]);
    }
}
