use crate::tree::{BinarySearchTree, NodeId};

/// In-order walk over node ids, driven by an explicit stack so degenerate
/// (list-shaped) trees do not recurse.
pub(crate) struct InOrder<'a, T> {
    tree: &'a BinarySearchTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(tree: &'a BinarySearchTree<T>) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::new(),
        };
        walk.push_left_spine(tree.root_id());
        walk
    }

    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.tree.node(id).left;
        }
    }
}

impl<T> Iterator for InOrder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.tree.node(id).right);
        Some(id)
    }
}

/// An iterator over the values of a [`BinarySearchTree`], in ascending key order.
///
/// Created by [`BinarySearchTree::iter`].
pub struct Iter<'a, T> {
    walk: InOrder<'a, T>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a BinarySearchTree<T>) -> Self {
        Self {
            walk: InOrder::new(tree),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.walk.next()?;
        self.remaining -= 1;
        Some(&self.walk.tree.node(id).item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// An owning iterator over the values of a [`BinarySearchTree`], in ascending
/// key order.
pub struct IntoIter<T> {
    tree: BinarySearchTree<T>,
    order: std::vec::IntoIter<NodeId>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: BinarySearchTree<T>) -> Self {
        let order: Vec<NodeId> = InOrder::new(&tree).collect();
        Self {
            tree,
            order: order.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let id = self.order.next()?;
        Some(self.tree.release(id).item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
