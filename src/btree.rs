use core::fmt;

use crate::raw::RawBTree;
use crate::{Comparator, ConfigError, InvariantViolation, NaturalOrder, Order};

mod node_ref;
mod traverse;

pub use node_ref::NodeRef;
pub use traverse::Traverse;

/// An ordered set of keys stored in a B-tree of configurable order.
///
/// The order `M` bounds every node to at most `M - 1` keys and `M` children; every node but the
/// root keeps at least `(M - 1) / 2` keys. Overflowing nodes split around their lower median and
/// the median moves up, so the tree only grows at the root. Underflowing nodes borrow through
/// their parent from an adjacent sibling or merge with one, so the tree only shrinks at the root.
/// All leaves therefore always sit at the same depth.
///
/// Keys are ordered by the tree's [`Comparator`], which defaults to [`NaturalOrder`]. It is a
/// logic error for a key to change its ordering relative to other keys while it is in the tree,
/// or for the comparator not to be a total order. The resulting behavior is not specified but is
/// memory safe: it may include panics, incorrect results and lost keys.
///
/// # Examples
///
/// ```
/// use ordtree::BTree;
///
/// let mut tree = BTree::new(5).unwrap();
///
/// tree.insert("delta");
/// tree.insert("alpha");
/// tree.insert("charlie");
/// tree.insert("bravo");
///
/// assert!(tree.contains(&"bravo"));
/// assert!(!tree.insert("alpha"));
///
/// tree.remove(&"charlie");
///
/// for key in &tree {
///     println!("{key}");
/// }
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Clone)]
pub struct BTree<K, C = NaturalOrder> {
    raw: RawBTree<K, C>,
}

impl<K: Ord> BTree<K> {
    /// Makes a new, empty tree of the given order, ordering keys by [`Ord`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OrderTooSmall`] if `order < 3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let tree: BTree<u64> = BTree::new(4).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BTree::<u64>::new(2).is_err());
    /// ```
    pub fn new(order: usize) -> Result<Self, ConfigError> {
        BTree::with_comparator(order, NaturalOrder)
    }
}

impl<K, C: Comparator<K>> BTree<K, C> {
    /// Makes a new, empty tree of the given order that orders keys with `cmp`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OrderTooSmall`] if `order < 3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// // Case-insensitive keys.
    /// let mut tree = BTree::with_comparator(4, |a: &&str, b: &&str| {
    ///     a.to_lowercase().cmp(&b.to_lowercase())
    /// })
    /// .unwrap();
    /// tree.insert("Rust");
    /// assert!(tree.contains(&"rust"));
    /// assert!(!tree.insert("RUST"));
    /// ```
    pub fn with_comparator(order: usize, cmp: C) -> Result<Self, ConfigError> {
        Ok(BTree::with_order(Order::new(order)?, cmp))
    }

    /// Makes a new, empty tree from an already validated [`Order`].
    #[must_use]
    pub fn with_order(order: Order, cmp: C) -> Self {
        BTree {
            raw: RawBTree::new(order, cmp),
        }
    }

    /// Adds a key to the tree.
    ///
    /// Returns whether the key was newly inserted. If the tree already held an equal key,
    /// `false` is returned and the tree is left untouched; use [`replace`](Self::replace) to
    /// overwrite it instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// assert_eq!(tree.insert(2), true);
    /// assert_eq!(tree.insert(2), false);
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> bool {
        self.raw.insert(key)
    }

    /// Adds a key to the tree, replacing and returning an equal key if there was one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// // Entries compare by name only.
    /// let mut tree = BTree::with_comparator(4, |a: &(&str, u32), b: &(&str, u32)| a.0.cmp(b.0)).unwrap();
    /// assert_eq!(tree.replace(("apples", 3)), None);
    /// assert_eq!(tree.replace(("apples", 5)), Some(("apples", 3)));
    /// assert_eq!(tree.get(&("apples", 0)), Some(&("apples", 5)));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn replace(&mut self, key: K) -> Option<K> {
        self.raw.replace(key)
    }

    /// Removes a key from the tree. Returns whether such a key was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.insert(2);
    /// assert_eq!(tree.remove(&2), true);
    /// assert_eq!(tree.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &K) -> bool {
        self.raw.remove(key).is_some()
    }

    /// Removes and returns the key in the tree equal to the given one, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.take(&2), Some(2));
    /// assert_eq!(tree.take(&2), None);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.raw.remove(key)
    }

    /// Returns `true` if the tree holds a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.contains(&1), true);
    /// assert_eq!(tree.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.raw.contains(key)
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.raw.get(key)
    }

    /// Checks every structural invariant of the tree.
    ///
    /// This walks the whole tree and verifies node fill bounds, child counts, key order within
    /// and across nodes, uniform leaf depth, parent links, the stored length and that no
    /// detached node is still allocated. It never passes on a tree built only through this
    /// type's public API with a lawful comparator.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.extend(0..100);
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.raw.validate()
    }
}

impl<K, C> BTree<K, C> {
    /// Returns the number of keys in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of levels in the tree. An empty tree is a single leaf of height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// assert_eq!(tree.height(), 1);
    /// tree.extend([1, 2, 3]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    #[must_use]
    pub const fn order(&self) -> Order {
        self.raw.order()
    }

    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Removes every key, leaving an empty root leaf.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the smallest key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// assert_eq!(tree.first(), None);
    /// tree.extend([7, 3, 9]);
    /// assert_eq!(tree.first(), Some(&3));
    /// assert_eq!(tree.last(), Some(&9));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first()
    }

    /// Returns the largest key, if any.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last()
    }

    /// Removes and returns the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.extend([2, 1]);
    /// while let Some(key) = tree.pop_first() {
    ///     assert!(tree.iter().all(|&k| k > key));
    /// }
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<K> {
        self.raw.pop_first()
    }

    /// Removes and returns the largest key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<K> {
        self.raw.pop_last()
    }

    /// Visits every key in ascending order.
    ///
    /// The traversal is lazy and borrows the tree, so the tree cannot change while it is live.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// tree.extend([30, 10, 20]);
    /// let mut keys = tree.traverse();
    /// assert_eq!(keys.len(), 3);
    /// assert_eq!(keys.next(), Some(&10));
    /// assert_eq!(keys.next(), Some(&20));
    /// assert_eq!(keys.next(), Some(&30));
    /// assert_eq!(keys.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for a full traversal, O(log n) worst case per key.
    pub fn traverse(&self) -> Traverse<'_, K> {
        Traverse::new(self.raw.nodes(), self.raw.root(), self.raw.len())
    }

    /// Alias for [`traverse`](Self::traverse).
    pub fn iter(&self) -> Traverse<'_, K> {
        self.traverse()
    }

    /// Returns a read-only view of the root node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::BTree;
    ///
    /// let mut tree = BTree::new(5).unwrap();
    /// tree.extend(1..=8);
    /// let root = tree.root();
    /// assert_eq!(root.keys(), &[3, 6]);
    /// let leaves: Vec<&[i32]> = root.children().map(|child| child.keys()).collect();
    /// assert_eq!(leaves, [&[1, 2][..], &[4, 5], &[7, 8]]);
    /// ```
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, K> {
        NodeRef::new(self.raw.nodes(), self.raw.root())
    }
}

impl<K: Ord> Default for BTree<K> {
    /// Creates an empty tree of [`Order::DEFAULT`].
    fn default() -> Self {
        BTree::with_order(Order::DEFAULT, NaturalOrder)
    }
}

impl<K: fmt::Debug, C> fmt::Debug for BTree<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Trees are equal when they hold equal key sequences, whatever their orders or shapes.
impl<K: PartialEq, C> PartialEq for BTree<K, C> {
    fn eq(&self, other: &BTree<K, C>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for BTree<K, C> {}

impl<K: Ord> FromIterator<K> for BTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = BTree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, C: Comparator<K>> Extend<K> for BTree<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Copy, C: Comparator<K>> Extend<&'a K> for BTree<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        for &key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a BTree<K, C> {
    type Item = &'a K;
    type IntoIter = Traverse<'a, K>;

    fn into_iter(self) -> Traverse<'a, K> {
        self.iter()
    }
}
