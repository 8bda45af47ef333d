//! # ordset — ordered-set containers over a user-supplied total order
//!
//! A binary search tree, a red-black tree built on the same internal
//! descent/rotation/splice-out primitives, and an array-backed binary
//! heap — all parameterized by a comparator rather than requiring `Ord`
//! directly, so callers can order values however they like.
//!
//! ```
//! use ordset::RedBlackTree;
//!
//! let mut tree = RedBlackTree::new();
//! tree.insert(5);
//! tree.insert(3);
//! tree.insert(7);
//! assert_eq!(tree.find(&5), Some(&5));
//! assert_eq!(tree.lnr().copied().collect::<Vec<_>>(), vec![3, 5, 7]);
//! ```

mod arena;
pub mod bst;
pub mod comparator;
mod core;
pub mod error;
pub mod heap;
pub mod rbt;
mod traverse;

pub use bst::BinarySearchTree;
pub use comparator::{ascend, descend, CmpFn};
pub use error::Error;
pub use heap::BinaryHeap;
pub use rbt::RedBlackTree;
