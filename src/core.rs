//! The BST primitives shared by [`crate::bst`] and [`crate::rbt`].
//!
//! Everything here is generic over `N: Linked<T>` so the red-black tree can
//! reuse the same descent, rotation, and splice-out code as the plain BST
//! without duplicating it — the red-black tree supplies its own node type
//! (with a color bit) and its own node-factory closure, and gets the same
//! tree-shape machinery for free.

use crate::arena::{Arena, Index};
use std::cmp::Ordering;

/// A rotation/descent direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    pub(crate) fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// The accessor surface `core`'s generic primitives need from a node type.
/// Implemented by both `bst::node::BstNode<T>` and `rbt::node::RbtNode<T>`.
pub(crate) trait Linked<T> {
    fn value(&self) -> &T;
    fn value_mut(&mut self) -> &mut T;
    fn parent(&self) -> Option<Index>;
    fn set_parent(&mut self, p: Option<Index>);
    fn left(&self) -> Option<Index>;
    fn set_left(&mut self, c: Option<Index>);
    fn right(&self) -> Option<Index>;
    fn set_right(&mut self, c: Option<Index>);

    fn child(&self, dir: Dir) -> Option<Index> {
        match dir {
            Dir::Left => self.left(),
            Dir::Right => self.right(),
        }
    }

    fn set_child(&mut self, dir: Dir, c: Option<Index>) {
        match dir {
            Dir::Left => self.set_left(c),
            Dir::Right => self.set_right(c),
        }
    }
}

/// Descend from `root` comparing against `v`; `Some` on an exact match.
pub(crate) fn find_node<T, N: Linked<T>>(
    arena: &Arena<N>,
    root: Option<Index>,
    v: &T,
    cmp: &dyn Fn(&T, &T) -> Ordering,
) -> Option<Index> {
    let mut cur = root;
    while let Some(idx) = cur {
        match cmp(v, arena.get(idx).value()) {
            Ordering::Equal => return Some(idx),
            Ordering::Less => cur = arena.get(idx).left(),
            Ordering::Greater => cur = arena.get(idx).right(),
        }
    }
    None
}

/// The minimum (leftmost) node of the subtree rooted at `root`.
pub(crate) fn min_node<T, N: Linked<T>>(arena: &Arena<N>, root: Index) -> Index {
    let mut cur = root;
    while let Some(l) = arena.get(cur).left() {
        cur = l;
    }
    cur
}

/// The maximum (rightmost) node of the subtree rooted at `root`.
pub(crate) fn max_node<T, N: Linked<T>>(arena: &Arena<N>, root: Index) -> Index {
    let mut cur = root;
    while let Some(r) = arena.get(cur).right() {
        cur = r;
    }
    cur
}

/// Descend to a leaf slot and attach a freshly built node there.
/// `make_node` is a node-factory closure: it lets `rbt` build a colored
/// node without this function knowing colors exist. Returns `None` on a
/// duplicate (no change made), otherwise the index of the inserted node.
pub(crate) fn insert_node<T, N: Linked<T>>(
    arena: &mut Arena<N>,
    root: &mut Option<Index>,
    value: T,
    cmp: &dyn Fn(&T, &T) -> Ordering,
    make_node: impl FnOnce(T) -> N,
) -> Option<Index> {
    let mut parent = None;
    let mut cur = *root;
    let mut dir = Dir::Left;
    while let Some(idx) = cur {
        match cmp(&value, arena.get(idx).value()) {
            Ordering::Equal => return None,
            Ordering::Less => {
                parent = Some(idx);
                dir = Dir::Left;
                cur = arena.get(idx).left();
            }
            Ordering::Greater => {
                parent = Some(idx);
                dir = Dir::Right;
                cur = arena.get(idx).right();
            }
        }
    }

    let mut node = make_node(value);
    node.set_parent(parent);
    let new_idx = arena.insert(node);
    match parent {
        None => *root = Some(new_idx),
        Some(p) => arena.get_mut(p).set_child(dir, Some(new_idx)),
    }
    Some(new_idx)
}

/// The record returned by [`remove_node`]: everything the RBT remove
/// fix-up needs about the physically detached node without re-deriving it.
pub(crate) struct Spliced {
    /// The node that was physically unlinked from the tree. Still present
    /// in the arena (the caller reclaims it once it's done reading, e.g.
    /// its color).
    pub(crate) victim: Index,
    /// `victim`'s parent after detachment (its position in the tree).
    pub(crate) parent: Option<Index>,
    /// The child that replaced `victim` in `parent`'s link (or the root).
    pub(crate) child: Option<Index>,
    /// Which side of `parent` `victim` occupied.
    pub(crate) dir: Dir,
}

/// Locate the in-order successor (if `x` has two children) or `x` itself,
/// detach it from the tree, and — if it wasn't `x` — move its value into
/// `x` via a swap.
pub(crate) fn remove_node<T, N: Linked<T>>(
    arena: &mut Arena<N>,
    root: &mut Option<Index>,
    x: Index,
) -> Spliced {
    let has_left = arena.get(x).left().is_some();
    let has_right = arena.get(x).right().is_some();
    let y = if !has_left || !has_right {
        x
    } else {
        min_node::<T, N>(arena, arena.get(x).right().unwrap())
    };

    if y != x {
        let (xn, yn) = arena.get2_mut(x, y);
        std::mem::swap(xn.value_mut(), yn.value_mut());
    }

    // y has at most one child: its left slot is empty whenever y was
    // chosen as an in-order successor, and by construction whenever y == x
    // had fewer than two children to begin with.
    let replacement = arena.get(y).left().or_else(|| arena.get(y).right());
    let y_parent = arena.get(y).parent();

    if let Some(r) = replacement {
        arena.get_mut(r).set_parent(y_parent);
    }

    let dir = match y_parent {
        None => Dir::Left,
        Some(p) => {
            if arena.get(p).left() == Some(y) {
                Dir::Left
            } else {
                Dir::Right
            }
        }
    };

    match y_parent {
        None => *root = replacement,
        Some(p) => arena.get_mut(p).set_child(dir, replacement),
    }

    Spliced {
        victim: y,
        parent: y_parent,
        child: replacement,
        dir,
    }
}

fn rotate_left<T, N: Linked<T>>(
    arena: &mut Arena<N>,
    root: &mut Option<Index>,
    x: Index,
) -> Result<(), crate::error::Error> {
    let y = arena
        .get(x)
        .right()
        .ok_or(crate::error::Error::RotationPrecondition)?;

    let y_left = arena.get(y).left();
    arena.get_mut(x).set_right(y_left);
    if let Some(yl) = y_left {
        arena.get_mut(yl).set_parent(Some(x));
    }

    let x_parent = arena.get(x).parent();
    arena.get_mut(y).set_parent(x_parent);
    match x_parent {
        None => *root = Some(y),
        Some(p) => {
            let dir = if arena.get(p).left() == Some(x) {
                Dir::Left
            } else {
                Dir::Right
            };
            arena.get_mut(p).set_child(dir, Some(y));
        }
    }

    arena.get_mut(y).set_left(Some(x));
    arena.get_mut(x).set_parent(Some(y));
    Ok(())
}

fn rotate_right<T, N: Linked<T>>(
    arena: &mut Arena<N>,
    root: &mut Option<Index>,
    x: Index,
) -> Result<(), crate::error::Error> {
    let y = arena
        .get(x)
        .left()
        .ok_or(crate::error::Error::RotationPrecondition)?;

    let y_right = arena.get(y).right();
    arena.get_mut(x).set_left(y_right);
    if let Some(yr) = y_right {
        arena.get_mut(yr).set_parent(Some(x));
    }

    let x_parent = arena.get(x).parent();
    arena.get_mut(y).set_parent(x_parent);
    match x_parent {
        None => *root = Some(y),
        Some(p) => {
            let dir = if arena.get(p).left() == Some(x) {
                Dir::Left
            } else {
                Dir::Right
            };
            arena.get_mut(p).set_child(dir, Some(y));
        }
    }

    arena.get_mut(y).set_right(Some(x));
    arena.get_mut(x).set_parent(Some(y));
    Ok(())
}

/// Rotate `node` in direction `dir`: `dir = Left` pivots on `node`'s right
/// child (the textbook LEFT-ROTATE), `dir = Right` pivots on its left child
/// (RIGHT-ROTATE).
pub(crate) fn rotate_node<T, N: Linked<T>>(
    arena: &mut Arena<N>,
    root: &mut Option<Index>,
    node: Index,
    dir: Dir,
) -> Result<(), crate::error::Error> {
    match dir {
        Dir::Left => rotate_left(arena, root, node),
        Dir::Right => rotate_right(arena, root, node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[derive(Debug)]
    struct Plain {
        value: i32,
        parent: Option<Index>,
        left: Option<Index>,
        right: Option<Index>,
    }

    impl Linked<i32> for Plain {
        fn value(&self) -> &i32 {
            &self.value
        }
        fn value_mut(&mut self) -> &mut i32 {
            &mut self.value
        }
        fn parent(&self) -> Option<Index> {
            self.parent
        }
        fn set_parent(&mut self, p: Option<Index>) {
            self.parent = p;
        }
        fn left(&self) -> Option<Index> {
            self.left
        }
        fn set_left(&mut self, c: Option<Index>) {
            self.left = c;
        }
        fn right(&self) -> Option<Index> {
            self.right
        }
        fn set_right(&mut self, c: Option<Index>) {
            self.right = c;
        }
    }

    fn leaf(value: i32) -> Plain {
        Plain {
            value,
            parent: None,
            left: None,
            right: None,
        }
    }

    fn cmp(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn insert_find_and_duplicate() {
        let mut arena: Arena<Plain> = Arena::new();
        let mut root: Option<Index> = None;
        for v in [5, 3, 7, 1] {
            assert!(insert_node(&mut arena, &mut root, v, &cmp, leaf).is_some());
        }
        assert!(insert_node(&mut arena, &mut root, 3, &cmp, leaf).is_none());
        assert_eq!(*arena.get(find_node(&arena, root, &7, &cmp).unwrap()).value(), 7);
        assert!(find_node(&arena, root, &42, &cmp).is_none());
    }

    #[test]
    fn rotate_left_then_right_restores_shape() {
        let mut arena: Arena<Plain> = Arena::new();
        let mut root: Option<Index> = None;
        for v in [2, 1, 3] {
            insert_node(&mut arena, &mut root, v, &cmp, leaf).unwrap();
        }
        let root_idx = root.unwrap();
        rotate_node(&mut arena, &mut root, root_idx, Dir::Left).unwrap();
        let new_root = root.unwrap();
        assert_eq!(*arena.get(new_root).value(), 3);
        rotate_node(&mut arena, &mut root, new_root, Dir::Right).unwrap();
        assert_eq!(*arena.get(root.unwrap()).value(), 2);
    }

    #[test]
    fn rotate_without_required_child_fails() {
        let mut arena: Arena<Plain> = Arena::new();
        let mut root = Some(arena.insert(leaf(1)));
        let idx = root.unwrap();
        assert!(matches!(
            rotate_node(&mut arena, &mut root, idx, Dir::Left),
            Err(crate::error::Error::RotationPrecondition)
        ));
    }

    #[test]
    fn remove_two_children_swaps_successor_value() {
        let mut arena: Arena<Plain> = Arena::new();
        let mut root: Option<Index> = None;
        for v in [5, 3, 7, 6, 8] {
            insert_node(&mut arena, &mut root, v, &cmp, leaf).unwrap();
        }
        let five = find_node(&arena, root, &5, &cmp).unwrap();
        let spliced = remove_node(&mut arena, &mut root, five);
        // successor of 5 is 6; 6 should now be gone from the tree (freed
        // as the victim) and 5's slot should hold 6's value.
        assert_eq!(*arena.get(five).value(), 6);
        arena.remove(spliced.victim);
        assert!(find_node(&arena, root, &6, &cmp).is_some());
        assert!(find_node(&arena, root, &5, &cmp).is_none());
    }
}
