//! The unbalanced BST node: value plus parent/left/right links.

use crate::arena::Index;
use crate::core::Linked;

#[derive(Debug)]
pub(crate) struct BstNode<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<Index>,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl<T> BstNode<T> {
    pub(crate) fn leaf(value: T) -> Self {
        BstNode {
            value,
            parent: None,
            left: None,
            right: None,
        }
    }
}

impl<T> Linked<T> for BstNode<T> {
    fn value(&self) -> &T {
        &self.value
    }
    fn value_mut(&mut self) -> &mut T {
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
