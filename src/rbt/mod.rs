//! Red-Black Tree.
//!
//! Composes [`crate::core`]'s generic BST primitives by composition rather
//! than subclassing: `RedBlackTree` is a sibling of
//! [`crate::bst::BinarySearchTree`], not a subtype of it, and supplies its
//! own node type and its own fix-up routines on top of the shared
//! descent/rotation/splice-out machinery.

mod node;

use crate::arena::{Arena, Index};
use crate::comparator::{rc_ascend, CmpFn};
use crate::core::{self, Dir};
use crate::error::Error;
use crate::traverse;
use node::RbtNode;
use std::cmp::Ordering;

pub struct Lnr<'a, T>(traverse::Lnr<'a, T, RbtNode<T>>);
pub struct Rnl<'a, T>(traverse::Rnl<'a, T, RbtNode<T>>);
pub struct Nlr<'a, T>(traverse::Nlr<'a, T, RbtNode<T>>);
pub struct Lrn<'a, T>(traverse::Lrn<'a, T, RbtNode<T>>);
pub struct Lvl<'a, T>(traverse::Lvl<'a, T, RbtNode<T>>);

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

/// A self-balancing binary search tree maintaining the classical red-black
/// invariants, guaranteeing `O(log n)` find/insert/remove.
pub struct RedBlackTree<T> {
    arena: Arena<RbtNode<T>>,
    root: Option<Index>,
    size: usize,
    cmp: CmpFn<T>,
}

impl<T: Ord> RedBlackTree<T> {
    pub fn new() -> Self {
        RedBlackTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp: rc_ascend(),
        }
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for v in iter {
            tree.insert(v);
        }
        tree
    }
}

impl<T> RedBlackTree<T> {
    pub fn with_cmp(cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        RedBlackTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp: std::rc::Rc::new(cmp),
        }
    }

    pub fn try_new(cmp: Option<CmpFn<T>>) -> Result<Self, Error> {
        let cmp = cmp.ok_or(Error::InvalidComparator)?;
        Ok(RedBlackTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            cmp,
        })
    }

    pub fn from_iter_with_cmp(iter: impl IntoIterator<Item = T>, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        let mut tree = Self::with_cmp(cmp);
        for v in iter {
            tree.insert(v);
        }
        tree
    }

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

    /// Inserts `v`; returns `false` if an equivalent value is already
    /// present. Runs the insert fix-up afterwards.
    pub fn insert(&mut self, v: T) -> bool {
        match core::insert_node(&mut self.arena, &mut self.root, v, self.cmp.as_ref(), RbtNode::red_leaf) {
            None => false,
            Some(new_idx) => {
                self.size += 1;
                self.insert_fixup(new_idx);
                true
            }
        }
    }

    /// Removes the value equivalent to `v`; returns `false` if absent.
    /// Runs the remove fix-up when the physically detached node was black.
    pub fn remove(&mut self, v: &T) -> bool {
        let Some(x) = core::find_node(&self.arena, self.root, v, self.cmp.as_ref()) else {
            return false;
        };
        let spliced = core::remove_node(&mut self.arena, &mut self.root, x);
        let victim_was_red = self.arena.get(spliced.victim).red;
        if !victim_was_red {
            self.remove_fixup(spliced.parent, spliced.child, spliced.dir);
        }
        self.arena.remove(spliced.victim);
        self.size -= 1;
        if let Some(r) = self.root {
            self.arena.get_mut(r).red = false;
        }
        true
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

    fn is_red(&self, idx: Option<Index>) -> bool {
        idx.map_or(false, |i| self.arena.get(i).red)
    }

    fn is_black(&self, idx: Option<Index>) -> bool {
        !self.is_red(idx)
    }

    fn dir_from(&self, parent: Index, child: Index) -> Dir {
        if self.arena.get(parent).left() == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    /// Insert fix-up: re-colors and rotates up from the newly inserted
    /// node until the red-black invariants are restored.
    fn insert_fixup(&mut self, mut x: Index) {
        while let Some(p) = self.arena.get(x).parent() {
            if !self.arena.get(p).red {
                break;
            }
            // p is red, so p is not the root, so p has a parent.
            let g = self.arena.get(p).parent().expect("red node must have a parent");
            let p_dir = self.dir_from(g, p);
            let u_dir = p_dir.opposite();
            let u = self.arena.get(g).child(u_dir);

            if self.is_red(u) {
                self.arena.get_mut(p).red = false;
                self.arena.get_mut(u.unwrap()).red = false;
                self.arena.get_mut(g).red = true;
                x = g;
            } else {
                let mut x_local = x;
                let mut p_local = p;
                if self.dir_from(p_local, x_local) == u_dir {
                    // x is the "inner" child: rotate it up to take p's place.
                    x_local = p_local;
                    core::rotate_node(&mut self.arena, &mut self.root, x_local, p_dir)
                        .expect("red-black insert fix-up: rotation precondition");
                    p_local = self.arena.get(x_local).parent().expect("rotation must leave a parent");
                }
                self.arena.get_mut(p_local).red = false;
                self.arena.get_mut(g).red = true;
                core::rotate_node(&mut self.arena, &mut self.root, g, u_dir)
                    .expect("red-black insert fix-up: rotation precondition");
                break;
            }
        }
        if let Some(r) = self.root {
            self.arena.get_mut(r).red = false;
        }
    }

    /// Remove fix-up. `parent`/`current`/`dir` must be passed explicitly
    /// rather than derived from `current` alone, since `current` may be
    /// absent (the just-cleared child slot), leaving no node to read a
    /// direction from.
    fn remove_fixup(&mut self, mut parent: Option<Index>, mut current: Option<Index>, mut dir: Dir) {
        while let Some(p) = parent {
            if !self.is_black(current) {
                break;
            }
            let sd = dir.opposite();
            let mut s = self.arena.get(p).child(sd);

            if self.is_red(s) {
                let si = s.expect("sibling must be present to be red");
                self.arena.get_mut(si).red = false;
                self.arena.get_mut(p).red = true;
                core::rotate_node(&mut self.arena, &mut self.root, p, dir)
                    .expect("red-black remove fix-up: rotation precondition");
                s = self.arena.get(p).child(sd);
            }

            let si = s.expect("red-black remove fix-up: sibling must be present");

            let s_left_black = self.is_black(self.arena.get(si).left());
            let s_right_black = self.is_black(self.arena.get(si).right());
            if s_left_black && s_right_black {
                self.arena.get_mut(si).red = true;
                current = Some(p);
                parent = self.arena.get(p).parent();
                if let Some(pp) = parent {
                    dir = self.dir_from(pp, p);
                }
            } else {
                let far_black = self.is_black(self.arena.get(si).child(sd));
                let mut si = si;
                if far_black {
                    let near = self.arena.get(si).child(dir);
                    if let Some(ni) = near {
                        self.arena.get_mut(ni).red = false;
                    }
                    self.arena.get_mut(si).red = true;
                    core::rotate_node(&mut self.arena, &mut self.root, si, sd)
                        .expect("red-black remove fix-up: rotation precondition");
                    si = self
                        .arena
                        .get(p)
                        .child(sd)
                        .expect("sibling must be present after rotation");
                }
                let p_red = self.arena.get(p).red;
                self.arena.get_mut(si).red = p_red;
                self.arena.get_mut(p).red = false;
                if let Some(far) = self.arena.get(si).child(sd) {
                    self.arena.get_mut(far).red = false;
                }
                core::rotate_node(&mut self.arena, &mut self.root, p, dir)
                    .expect("red-black remove fix-up: rotation precondition");
                current = self.root;
                parent = None;
            }
        }
        if let Some(c) = current {
            self.arena.get_mut(c).red = false;
        }
    }
}

impl<T: Clone> RedBlackTree<T> {
    pub fn rebuild_with(&self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        let mut tree = Self::with_cmp(cmp);
        for v in self.lnr() {
            tree.insert(v.clone());
        }
        tree
    }

    pub fn transform<U>(&self, cmp: impl Fn(&U, &U) -> Ordering + 'static, map: impl Fn(&T) -> U) -> RedBlackTree<U> {
        let mut tree = RedBlackTree::with_cmp(cmp);
        for v in self.lnr() {
            tree.insert(map(v));
        }
        tree
    }
}

impl<T: Clone> Clone for RedBlackTree<T> {
    /// Structural clone preserving shape *and* color.
    fn clone(&self) -> Self {
        let mut arena: Arena<RbtNode<T>> = Arena::new();
        let root = self
            .root
            .map(|r| clone_subtree(&self.arena, &mut arena, r, None));
        RedBlackTree {
            arena,
            root,
            size: self.size,
            cmp: self.cmp.clone(),
        }
    }
}

fn clone_subtree<T: Clone>(
    src: &Arena<RbtNode<T>>,
    dst: &mut Arena<RbtNode<T>>,
    idx: Index,
    parent: Option<Index>,
) -> Index {
    let node = src.get(idx);
    let new_idx = dst.insert(RbtNode {
        value: node.value.clone(),
        red: node.red,
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

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Lnr<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.lnr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_red_black(tree: &RedBlackTree<i32>) -> bool {
        fn check(tree: &RedBlackTree<i32>, idx: Option<Index>) -> Option<usize> {
            match idx {
                None => Some(1), // sentinel black leaf
                Some(i) => {
                    let node = tree.arena.get(i);
                    if node.red {
                        if tree.is_red(node.left) || tree.is_red(node.right) {
                            return None;
                        }
                    }
                    let left_bh = check(tree, node.left)?;
                    let right_bh = check(tree, node.right)?;
                    if left_bh != right_bh {
                        return None;
                    }
                    Some(left_bh + if node.red { 0 } else { 1 })
                }
            }
        }
        if let Some(r) = tree.root {
            if tree.arena.get(r).red {
                return false;
            }
        }
        check(tree, tree.root).is_some()
    }

    #[test]
    fn root_is_always_black() {
        let mut t = RedBlackTree::new();
        t.insert(5);
        assert!(!t.arena.get(t.root.unwrap()).red);
    }

    #[test]
    fn clrs_style_insertion_scenario() {
        let mut t = RedBlackTree::new();
        for v in [3, 10, 13, 4, 6, 7, 1, 14] {
            t.insert(v);
        }
        assert_eq!(t.lnr().copied().collect::<Vec<_>>(), vec![1, 3, 4, 6, 7, 10, 13, 14]);
        assert_eq!(t.min(), Some(&1));
        assert_eq!(t.max(), Some(&14));
        assert_eq!(t.find(&42), None);
        assert_eq!(t.find(&7), Some(&7));
        assert!(!t.remove(&42));
        assert!(t.remove(&7));
        assert_eq!(t.lnr().copied().collect::<Vec<_>>(), vec![1, 3, 4, 6, 10, 13, 14]);
        assert!(is_red_black(&t));
    }

    #[test]
    fn descending_comparator_scenario() {
        let mut t = RedBlackTree::with_cmp(crate::comparator::descend);
        for v in [3, 10, 13, 4, 6, 7, 1, 14] {
            t.insert(v);
        }
        assert_eq!(t.lnr().copied().collect::<Vec<_>>(), vec![14, 13, 10, 7, 6, 4, 3, 1]);
        assert_eq!(t.min(), Some(&14));
        assert_eq!(t.max(), Some(&1));
    }

    #[test]
    fn insert_rebalance_left_side_scenario() {
        let mut t = RedBlackTree::new();
        for v in [8, 4, 10, 0, 6, 11, -2, 2] {
            t.insert(v);
        }
        assert_eq!(
            t.nlr().copied().collect::<Vec<_>>(),
            vec![8, 4, 0, -2, 2, 6, 10, 11]
        );
        t.insert(-3);
        assert_eq!(
            t.nlr().copied().collect::<Vec<_>>(),
            vec![4, 0, -2, -3, 2, 8, 6, 10, 11]
        );
        assert_eq!(
            t.lvl().copied().collect::<Vec<_>>(),
            vec![4, 0, 8, -2, 2, 6, 10, -3, 11]
        );
        assert!(is_red_black(&t));
    }

    #[test]
    fn remove_root_of_three() {
        let mut t = RedBlackTree::new();
        for v in [0, -1, 1] {
            t.insert(v);
        }
        assert_eq!(t.nlr().copied().collect::<Vec<_>>(), vec![0, -1, 1]);
        assert!(t.remove(&0));
        assert_eq!(t.nlr().copied().collect::<Vec<_>>(), vec![1, -1]);
        assert!(is_red_black(&t));
    }

    #[test]
    fn invariants_hold_over_many_insertions_and_removals() {
        let mut t = RedBlackTree::new();
        for v in 0..200 {
            t.insert(v);
            assert!(is_red_black(&t));
        }
        for v in (0..200).step_by(2) {
            t.remove(&v);
            assert!(is_red_black(&t));
        }
        assert_eq!(t.size(), 100);
        let expected: Vec<i32> = (0..200).filter(|v| v % 2 != 0).collect();
        assert_eq!(t.lnr().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn from_iter_mapped_applies_map_before_insertion() {
        let words = ["a", "bbb", "cc"];
        let t = RedBlackTree::from_iter_mapped(words, |a: &usize, b: &usize| a.cmp(b), |w: &str, i: usize| w.len() + i);
        // lengths 1,3,2 plus indices 0,1,2 -> 1,4,4 -> duplicate 4 collapses to one entry
        assert_eq!(t.lnr().copied().collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn transform_maps_values_into_a_new_tree() {
        let mut t = RedBlackTree::new();
        for v in [3, 1, 2] {
            t.insert(v);
        }
        let doubled = t.transform(|a: &i32, b: &i32| a.cmp(b), |v| v * 2);
        assert_eq!(doubled.lnr().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(doubled.size(), t.size());
    }

    /// Walks every reachable node and checks both directions of link
    /// symmetry: a child's parent link points back to its actual parent,
    /// and the root's parent link is absent.
    fn check_link_integrity(tree: &RedBlackTree<i32>) {
        fn walk(tree: &RedBlackTree<i32>, idx: Index, expected_parent: Option<Index>) {
            let node = tree.arena.get(idx);
            assert_eq!(node.parent(), expected_parent);
            if let Some(l) = node.left() {
                walk(tree, l, Some(idx));
            }
            if let Some(r) = node.right() {
                walk(tree, r, Some(idx));
            }
        }
        if let Some(r) = tree.root {
            assert_eq!(tree.arena.get(r).parent(), None);
            walk(tree, r, None);
        }
    }

    fn height(tree: &RedBlackTree<i32>, idx: Option<Index>) -> usize {
        match idx {
            None => 0,
            Some(i) => {
                let node = tree.arena.get(i);
                1 + height(tree, node.left()).max(height(tree, node.right()))
            }
        }
    }

    #[test]
    fn link_integrity_holds_over_many_insertions_and_removals() {
        let mut t = RedBlackTree::new();
        for v in 0..200 {
            t.insert(v);
            check_link_integrity(&t);
        }
        for v in (0..200).step_by(2) {
            t.remove(&v);
            check_link_integrity(&t);
        }
    }

    #[test]
    fn height_stays_within_the_logarithmic_bound() {
        let mut t = RedBlackTree::new();
        for v in 0..2_000 {
            t.insert(v);
        }
        let n = t.size() as f64;
        let bound = 2.0 * (n + 1.0).log2();
        assert!(
            (height(&t, t.root) as f64) <= bound,
            "height {} exceeds 2*log2(size+1) = {}",
            height(&t, t.root),
            bound
        );
    }

    #[test]
    fn clone_preserves_colors() {
        let mut t = RedBlackTree::new();
        for v in [3, 10, 13, 4, 6, 7, 1, 14] {
            t.insert(v);
        }
        let cloned = t.clone();
        fn colors(tree: &RedBlackTree<i32>, idx: Option<Index>, out: &mut Vec<bool>) {
            if let Some(i) = idx {
                let n = tree.arena.get(i);
                out.push(n.red);
                colors(tree, n.left, out);
                colors(tree, n.right, out);
            }
        }
        let mut a = Vec::new();
        let mut b = Vec::new();
        colors(&t, t.root, &mut a);
        colors(&cloned, cloned.root, &mut b);
        assert_eq!(a, b);
    }
}
