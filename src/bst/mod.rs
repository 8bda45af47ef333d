//! Unbalanced Binary Search Tree.
//!
//! Built on the shared [`crate::core`] arena primitives so
//! [`crate::rbt::RedBlackTree`] can reuse the descent, rotation, and
//! splice-out logic instead of duplicating it.

mod node;

use crate::arena::{Arena, Index};
use crate::comparator::{rc_ascend, CmpFn};
use crate::core;
use crate::error::Error;
use crate::traverse;
use node::BstNode;
use std::cmp::Ordering;

/// In-order iterator, yielding values in comparator order.
pub struct Lnr<'a, T>(traverse::Lnr<'a, T, BstNode<T>>);
/// Reverse in-order iterator.
pub struct Rnl<'a, T>(traverse::Rnl<'a, T, BstNode<T>>);
/// Preorder iterator.
pub struct Nlr<'a, T>(traverse::Nlr<'a, T, BstNode<T>>);
/// Postorder iterator.
pub struct Lrn<'a, T>(traverse::Lrn<'a, T, BstNode<T>>);
/// Level-order (breadth-first) iterator.
pub struct Lvl<'a, T>(traverse::Lvl<'a, T, BstNode<T>>);

macro_rules! forward_iterator {
    ($name:ident) => {
        impl<'a, T> Iterator for $name<'a, T> {
            type Item = &'a T;
            fn next(&mut self) -> Option<Self::Item> {
                self.0.next()
            }
        }
    };
}
forward_iterator!(Lnr);
forward_iterator!(Rnl);
forward_iterator!(Nlr);
forward_iterator!(Lrn);
forward_iterator!(Lvl);

/// An unbalanced binary search tree over a total order supplied by the
/// caller. Values are unique per the comparator; `insert` of an equivalent
/// value is a no-op.
pub struct BinarySearchTree<T> {
    pub(crate) arena: Arena<BstNode<T>>,
    pub(crate) root: Option<Index>,
    pub(crate) size: usize,
    pub(crate) cmp: CmpFn<T>,
}

impl<T: Ord> BinarySearchTree<T> {
    /// An empty tree using the natural (`Ord`) ascending order.
    pub fn new() -> Self {
        BinarySearchTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp: rc_ascend(),
        }
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for v in iter {
            tree.insert(v);
        }
        tree
    }
}

impl<T> BinarySearchTree<T> {
    /// An empty tree with an explicit comparator.
    pub fn with_cmp(cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        BinarySearchTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp: std::rc::Rc::new(cmp),
        }
    }

    /// Fallible construction: `None` models a comparator that was never
    /// supplied (`InvalidComparator`). `Ord`-based `new()` and
    /// closure-based `with_cmp` cannot fail — Rust's type system already
    /// rules out "not callable" for those.
    pub fn try_new(cmp: Option<CmpFn<T>>) -> Result<Self, Error> {
        let cmp = cmp.ok_or(Error::InvalidComparator)?;
        Ok(BinarySearchTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp,
        })
    }

    /// Construction path 1 with an overridden comparator: insert each
    /// element of `iter` in order under `cmp`.
    pub fn from_iter_with_cmp(iter: impl IntoIterator<Item = T>, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        let mut tree = Self::with_cmp(cmp);
        for v in iter {
            tree.insert(v);
        }
        tree
    }

    /// Construction path 1 with both a comparator and a `map(value, index)`
    /// transform applied before insertion.
    pub fn from_iter_mapped<U>(
        iter: impl IntoIterator<Item = U>,
        cmp: impl Fn(&T, &T) -> Ordering + 'static,
        map: impl Fn(U, usize) -> T,
    ) -> Self {
        let mut tree = Self::with_cmp(cmp);
        for (i, v) in iter.into_iter().enumerate() {
            tree.insert(map(v, i));
        }
        tree
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn find(&self, v: &T) -> Option<&T> {
        core::find_node(&self.arena, self.root, v, self.cmp.as_ref())
            .map(|idx| self.arena.get(idx).value())
    }

    /// Inserts `v`; returns `false` (no change) if an equivalent value is
    /// already present.
    pub fn insert(&mut self, v: T) -> bool {
        let inserted = core::insert_node(&mut self.arena, &mut self.root, v, self.cmp.as_ref(), BstNode::leaf);
        if inserted.is_some() {
            self.size += 1;
        }
        inserted.is_some()
    }

    /// Removes the value equivalent to `v`; returns `false` if absent.
    pub fn remove(&mut self, v: &T) -> bool {
        match core::find_node(&self.arena, self.root, v, self.cmp.as_ref()) {
            None => false,
            Some(x) => {
                let spliced = core::remove_node(&mut self.arena, &mut self.root, x);
                self.arena.remove(spliced.victim);
                self.size -= 1;
                true
            }
        }
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|r| self.arena.get(core::min_node(&self.arena, r)).value())
    }

    pub fn max(&self) -> Option<&T> {
        self.root.map(|r| self.arena.get(core::max_node(&self.arena, r)).value())
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    pub fn lnr(&self) -> Lnr<'_, T> {
        Lnr(traverse::Lnr::new(&self.arena, self.root))
    }

    pub fn rnl(&self) -> Rnl<'_, T> {
        Rnl(traverse::Rnl::new(&self.arena, self.root))
    }

    pub fn nlr(&self) -> Nlr<'_, T> {
        Nlr(traverse::Nlr::new(&self.arena, self.root))
    }

    pub fn lrn(&self) -> Lrn<'_, T> {
        Lrn(traverse::Lrn::new(&self.arena, self.root))
    }

    pub fn lvl(&self) -> Lvl<'_, T> {
        Lvl(traverse::Lvl::new(&self.arena, self.root))
    }
}

impl<T: Clone> BinarySearchTree<T> {
    /// Construction path 3 (tree source, `cmp` override, no `map`):
    /// reinsert every value, in-order, into a fresh tree under `cmp`.
    pub fn rebuild_with(&self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        let mut tree = Self::with_cmp(cmp);
        for v in self.lnr() {
            tree.insert(v.clone());
        }
        tree
    }

    /// Construction path 3 generalized with a `map`: reinsert every value,
    /// transformed, into a fresh tree of the mapped type under `cmp`.
    pub fn transform<U>(&self, cmp: impl Fn(&U, &U) -> Ordering + 'static, map: impl Fn(&T) -> U) -> BinarySearchTree<U> {
        let mut tree = BinarySearchTree::with_cmp(cmp);
        for v in self.lnr() {
            tree.insert(map(v));
        }
        tree
    }
}

impl<T: Clone> Clone for BinarySearchTree<T> {
    /// Construction path 2: structural clone. Deep-copies the node graph
    /// preserving shape, copies `size` directly, shares the comparator.
    fn clone(&self) -> Self {
        let mut arena: Arena<BstNode<T>> = Arena::new();
        let root = self
            .root
            .map(|r| clone_subtree(&self.arena, &mut arena, r, None));
        BinarySearchTree {
            arena,
            root,
            size: self.size,
            cmp: self.cmp.clone(),
        }
    }
}

fn clone_subtree<T: Clone>(
    src: &Arena<BstNode<T>>,
    dst: &mut Arena<BstNode<T>>,
    idx: Index,
    parent: Option<Index>,
) -> Index {
    let node = src.get(idx);
    let new_idx = dst.insert(BstNode {
        value: node.value.clone(),
        parent,
        left: None,
        right: None,
    });
    let left = node.left.map(|l| clone_subtree(src, dst, l, Some(new_idx)));
    let right = node.right.map(|r| clone_subtree(src, dst, r, Some(new_idx)));
    let n = dst.get_mut(new_idx);
    n.left = left;
    n.right = right;
    new_idx
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Lnr<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.lnr()
    }
}
