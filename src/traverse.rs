//! The five traversal iterators shared by `bst` and `rbt`: lazy, finite,
//! single-pass, not restartable, yielding values rather than nodes.
//! Generic over `N: Linked<T>` so both containers get the same iterator
//! code.

use crate::arena::{Arena, Index};
use crate::core::Linked;
use std::collections::VecDeque;

/// In-order (`lnr`): yields values in comparator order.
pub(crate) struct Lnr<'a, T, N> {
    arena: &'a Arena<N>,
    stack: Vec<Index>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T, N: Linked<T>> Lnr<'a, T, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<Index>) -> Self {
        let mut it = Lnr {
            arena,
            stack: Vec::new(),
            _marker: std::marker::PhantomData,
        };
        it.push_left(root);
        it
    }

    fn push_left(&mut self, mut cur: Option<Index>) {
        while let Some(idx) = cur {
            self.stack.push(idx);
            cur = self.arena.get(idx).left();
        }
    }
}

impl<'a, T, N: Linked<T>> Iterator for Lnr<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        self.push_left(self.arena.get(idx).right());
        Some(self.arena.get(idx).value())
    }
}

/// Reverse in-order (`rnl`): `lnr` reversed.
pub(crate) struct Rnl<'a, T, N> {
    arena: &'a Arena<N>,
    stack: Vec<Index>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T, N: Linked<T>> Rnl<'a, T, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<Index>) -> Self {
        let mut it = Rnl {
            arena,
            stack: Vec::new(),
            _marker: std::marker::PhantomData,
        };
        it.push_right(root);
        it
    }

    fn push_right(&mut self, mut cur: Option<Index>) {
        while let Some(idx) = cur {
            self.stack.push(idx);
            cur = self.arena.get(idx).right();
        }
    }
}

impl<'a, T, N: Linked<T>> Iterator for Rnl<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        self.push_right(self.arena.get(idx).left());
        Some(self.arena.get(idx).value())
    }
}

/// Preorder (`nlr`): node, then left subtree, then right subtree.
pub(crate) struct Nlr<'a, T, N> {
    arena: &'a Arena<N>,
    stack: Vec<Index>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T, N: Linked<T>> Nlr<'a, T, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<Index>) -> Self {
        Nlr {
            arena,
            stack: root.into_iter().collect(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T, N: Linked<T>> Iterator for Nlr<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.arena.get(idx);
        if let Some(r) = node.right() {
            self.stack.push(r);
        }
        if let Some(l) = node.left() {
            self.stack.push(l);
        }
        Some(node.value())
    }
}

/// Postorder (`lrn`): left subtree, right subtree, then node.
pub(crate) struct Lrn<'a, T, N> {
    arena: &'a Arena<N>,
    // (node, whether its children have already been pushed)
    stack: Vec<(Index, bool)>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T, N: Linked<T>> Lrn<'a, T, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<Index>) -> Self {
        Lrn {
            arena,
            stack: root.into_iter().map(|idx| (idx, false)).collect(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T, N: Linked<T>> Iterator for Lrn<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (idx, expanded) = *self.stack.last()?;
            if expanded {
                self.stack.pop();
                return Some(self.arena.get(idx).value());
            }
            self.stack.last_mut().unwrap().1 = true;
            let node = self.arena.get(idx);
            if let Some(r) = node.right() {
                self.stack.push((r, false));
            }
            if let Some(l) = node.left() {
                self.stack.push((l, false));
            }
        }
    }
}

/// Level order / breadth-first (`lvl`).
pub(crate) struct Lvl<'a, T, N> {
    arena: &'a Arena<N>,
    queue: VecDeque<Index>,
    _marker: std::marker::PhantomData<T>,
}

impl<'a, T, N: Linked<T>> Lvl<'a, T, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<Index>) -> Self {
        Lvl {
            arena,
            queue: root.into_iter().collect(),
            _marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T, N: Linked<T>> Iterator for Lvl<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.queue.pop_front()?;
        let node = self.arena.get(idx);
        if let Some(l) = node.left() {
            self.queue.push_back(l);
        }
        if let Some(r) = node.right() {
            self.queue.push_back(r);
        }
        Some(node.value())
    }
}
