//! A generic B-tree with a configurable order and a caller-supplied key ordering.
//!
//! This crate provides [`BTree`], an ordered index over any key type. The branching factor
//! ([`Order`]) is chosen at construction time and may be even or odd, and the ordering of keys
//! is a [`Comparator`] value the tree owns rather than a trait bound baked into the key type.
//!
//! - [`insert`](BTree::insert) - Add a key, splitting overflowing nodes on the way back up
//! - [`remove`](BTree::remove) - Remove a key, borrowing from or merging with siblings on underflow
//! - [`contains`](BTree::contains) - O(log n) membership test
//! - [`traverse`](BTree::traverse) - Lazy ascending traversal of every key
//!
//! # Example
//!
//! ```
//! use ordtree::BTree;
//!
//! let mut tree = BTree::new(4).unwrap();
//! for key in [10, 20, 30, 40] {
//!     tree.insert(key);
//! }
//!
//! // The fourth key overflowed the root leaf, which split around 20.
//! assert_eq!(tree.root().keys(), &[20]);
//! assert_eq!(tree.height(), 2);
//!
//! assert!(tree.remove(&20));
//! assert_eq!(tree.traverse().copied().collect::<Vec<_>>(), [10, 30, 40]);
//! ```
//!
//! A custom ordering is any `Fn(&K, &K) -> Ordering`:
//!
//! ```
//! use ordtree::BTree;
//!
//! let mut tree = BTree::with_comparator(3, |a: &i32, b: &i32| b.cmp(a)).unwrap();
//! tree.extend([1, 2, 3]);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Even orders** - Overflow splits and underflow borrows both use the lower median
//! - **Arena storage** - Nodes live in a slot arena; parent links are handles, not pointers
//!
//! # Implementation
//!
//! Every node keeps a handle to its parent, so the split and rebalance repairs walk upward
//! iteratively from the node that changed instead of re-descending from the root.

#![cfg_attr(not(test), no_std)]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order;
mod raw;

pub mod btree;

pub use btree::{BTree, NodeRef, Traverse};
pub use compare::{Comparator, NaturalOrder};
pub use error::{ConfigError, InvariantViolation};
pub use order::Order;
