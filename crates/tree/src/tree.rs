use core::cmp::Ordering;

use lootbag_core::{DomainError, DomainResult};

use crate::Keyed;
use crate::iter::{InOrder, IntoIter, Iter};

/// Stable index of a node inside a [`BinarySearchTree`].
///
/// An id is only meaningful for the tree that produced it, and only until the
/// node it names is removed (its slot is then recycled).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<NodeId> },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Where a node hangs: under `(parent, side)`, or at the root when `None`.
type Link = Option<(NodeId, Side)>;

/// Binary search tree keyed by [`Keyed::key`].
///
/// For every node, all keys in its left subtree compare less than the node's
/// key and all keys in its right subtree compare greater.
#[derive(Debug)]
pub struct BinarySearchTree<T> {
    slots: Vec<Slot<T>>,
    root: Option<NodeId>,
    free_head: Option<NodeId>,
    len: usize,
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            root: None,
            free_head: None,
            len: 0,
        }
    }
}

impl<T> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read cursor at the root, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.map(|id| NodeRef { tree: self, id })
    }

    /// Read cursor at `id`, if that slot currently holds a node.
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.get(id).map(|_| NodeRef { tree: self, id })
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(&node.item),
            _ => None,
        }
    }

    /// Mutable access to a node's value.
    ///
    /// Callers must not change the value's key; doing so breaks the ordering
    /// invariant (caught by [`check_invariants`](Self::check_invariants)).
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(&mut node.item),
            _ => None,
        }
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut tallest = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            tallest = tallest.max(depth);
            let node = self.node(id);
            pending.extend(node.left.map(|l| (l, depth + 1)));
            pending.extend(node.right.map(|r| (r, depth + 1)));
        }
        tallest
    }

    /// In-order (ascending key) iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Drops every node and value.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.free_head = None;
        self.len = 0;
    }

    /// Consumes the tree, yielding values in ascending key order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {id:?}"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {id:?}"),
        }
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free_head {
            Some(id) => {
                let Slot::Vacant { next_free } = self.slots[id.0] else {
                    unreachable!("free list points at occupied slot {id:?}");
                };
                self.free_head = next_free;
                self.slots[id.0] = Slot::Occupied(node);
                id
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match core::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id);
                node
            }
            Slot::Vacant { .. } => unreachable!("double release of slot {id:?}"),
        }
    }

    fn relink(&mut self, link: Link, child: Option<NodeId>) {
        match link {
            None => self.root = child,
            Some((parent, Side::Left)) => self.node_mut(parent).left = child,
            Some((parent, Side::Right)) => self.node_mut(parent).right = child,
        }
    }

    /// Unhooks the leftmost node of `right` and gives it both of the removed
    /// node's subtrees. Returns the successor's id.
    fn detach_successor(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let mut parent = None;
        let mut successor = right;
        while let Some(next) = self.node(successor).left {
            parent = Some(successor);
            successor = next;
        }

        if let Some(parent) = parent {
            let orphan = self.node(successor).right;
            self.node_mut(parent).left = orphan;
            self.node_mut(successor).right = Some(right);
        }
        self.node_mut(successor).left = Some(left);
        successor
    }
}

impl<T: Keyed> BinarySearchTree<T> {
    /// Inserts `item` as a new leaf.
    ///
    /// Returns the new node's id, or hands `item` back if its key is taken.
    pub fn insert(&mut self, item: T) -> Result<NodeId, T> {
        let mut link: Link = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            match item.key().cmp(node.item.key()) {
                Ordering::Equal => return Err(item),
                Ordering::Less => {
                    link = Some((id, Side::Left));
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Some((id, Side::Right));
                    cursor = node.right;
                }
            }
        }

        let id = self.alloc(Node {
            item,
            left: None,
            right: None,
        });
        self.relink(link, Some(id));
        self.len += 1;
        #[cfg(test)]
        debug_assert!(self.check_invariants().is_ok());
        Ok(id)
    }

    /// Removes the node holding `key` and returns its value.
    ///
    /// A node with two children is replaced by its in-order successor, which is
    /// relinked rather than copied, so every other node keeps its id.
    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let (link, id) = self.locate(key)?;
        let node = self.node(id);
        let replacement = match (node.left, node.right) {
            (None, child) | (child, None) => child,
            (Some(left), Some(right)) => Some(self.detach_successor(left, right)),
        };
        self.relink(link, replacement);
        self.len -= 1;
        let removed = self.release(id);
        #[cfg(test)]
        debug_assert!(self.check_invariants().is_ok());
        Some(removed.item)
    }

    pub fn find(&self, key: &T::Key) -> Option<NodeId> {
        self.locate(key).map(|(_, id)| id)
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.find(key).is_some()
    }

    /// Verifies the ordering invariant and the node count.
    ///
    /// Walks every node, so it is not run on ordinary mutations; callers and
    /// tests invoke it when they want the guarantee.
    pub fn check_invariants(&self) -> DomainResult<()> {
        let mut previous: Option<&T::Key> = None;
        let mut seen = 0usize;
        for id in InOrder::new(self) {
            let key = self.node(id).item.key();
            if previous.is_some_and(|prev| prev >= key) {
                return Err(DomainError::invariant(format!(
                    "keys out of order at node {}",
                    id.index()
                )));
            }
            previous = Some(key);
            seen += 1;
        }
        if seen != self.len {
            return Err(DomainError::invariant(format!(
                "reachable nodes ({seen}) differ from len ({})",
                self.len
            )));
        }
        Ok(())
    }

    fn locate(&self, key: &T::Key) -> Option<(Link, NodeId)> {
        let mut link: Link = None;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            match key.cmp(node.item.key()) {
                Ordering::Equal => return Some((link, id)),
                Ordering::Less => {
                    link = Some((id, Side::Left));
                    cursor = node.left;
                }
                Ordering::Greater => {
                    link = Some((id, Side::Right));
                    cursor = node.right;
                }
            }
        }
        None
    }
}

impl<T: Keyed> Extend<T> for BinarySearchTree<T> {
    /// Duplicate keys are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.insert(item);
        }
    }
}

impl<T: Keyed> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for BinarySearchTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

/// Read-only cursor on one node of a tree.
#[derive(Debug)]
pub struct NodeRef<'a, T> {
    tree: &'a BinarySearchTree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn item(&self) -> &'a T {
        &self.tree.node(self.id).item
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.tree.node(self.id).left.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.tree.node(self.id).right.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn tree_of(keys: &[u32]) -> BinarySearchTree<u32> {
        let mut tree = BinarySearchTree::new();
        for &k in keys {
            tree.insert(k).unwrap();
        }
        tree
    }

    fn keys(tree: &BinarySearchTree<u32>) -> Vec<u32> {
        tree.iter().copied().collect()
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree = BinarySearchTree::<u32>::new();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().next(), None);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn insert_keeps_keys_sorted() {
        let tree = tree_of(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(keys(&tree), vec![20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.height(), 3);

        let root = tree.root().unwrap();
        assert_eq!(*root.item(), 50);
        assert_eq!(*root.left().unwrap().item(), 30);
        assert_eq!(*root.right().unwrap().item(), 70);
        assert!(root.left().unwrap().left().unwrap().left().is_none());
    }

    #[test]
    fn duplicate_insert_hands_value_back() {
        let mut tree = tree_of(&[5, 3]);
        assert_eq!(tree.insert(3), Err(3));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn sorted_input_degenerates_to_a_list() {
        let tree = tree_of(&[1, 2, 3, 4, 5]);
        assert_eq!(tree.height(), 5);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn find_and_contains() {
        let tree = tree_of(&[8, 4, 12]);
        let id = tree.find(&12).unwrap();
        assert_eq!(tree.get(id), Some(&12));
        assert!(tree.contains_key(&4));
        assert!(!tree.contains_key(&5));
        assert_eq!(tree.find(&5), None);
    }

    #[test]
    fn remove_leaf() {
        let mut tree = tree_of(&[50, 30, 70]);
        assert_eq!(tree.remove(&30), Some(30));
        assert_eq!(keys(&tree), vec![50, 70]);
        assert!(tree.root().unwrap().left().is_none());
    }

    #[test]
    fn remove_node_with_one_child() {
        let mut tree = tree_of(&[50, 30, 20]);
        assert_eq!(tree.remove(&30), Some(30));
        assert_eq!(keys(&tree), vec![20, 50]);
        assert_eq!(*tree.root().unwrap().left().unwrap().item(), 20);
    }

    #[test]
    fn remove_with_direct_right_successor() {
        let mut tree = tree_of(&[50, 30, 70, 80]);
        assert_eq!(tree.remove(&50), Some(50));
        let root = tree.root().unwrap();
        assert_eq!(*root.item(), 70);
        assert_eq!(*root.left().unwrap().item(), 30);
        assert_eq!(*root.right().unwrap().item(), 80);
    }

    #[test]
    fn remove_with_deep_successor() {
        let mut tree = tree_of(&[50, 30, 70, 60, 80, 65]);
        let untouched = tree.find(&80).unwrap();
        assert_eq!(tree.remove(&50), Some(50));
        assert_eq!(*tree.root().unwrap().item(), 60);
        assert_eq!(keys(&tree), vec![30, 60, 65, 70, 80]);
        assert_eq!(tree.get(untouched), Some(&80));
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.remove(&9), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn removed_slots_are_recycled() {
        let mut tree = tree_of(&[10, 5, 15]);
        let freed = tree.find(&5).unwrap();
        tree.remove(&5);
        assert_eq!(tree.get(freed), None);
        assert!(tree.node_ref(freed).is_none());

        let reused = tree.insert(7).unwrap();
        assert_eq!(reused, freed);
        assert_eq!(keys(&tree), vec![7, 10, 15]);
    }

    #[test]
    fn clear_and_into_sorted_vec() {
        let mut tree = tree_of(&[3, 1, 2]);
        assert_eq!(tree_of(&[3, 1, 2]).into_sorted_vec(), vec![1, 2, 3]);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        tree.insert(4).unwrap();
        assert_eq!(keys(&tree), vec![4]);
    }

    #[test]
    fn string_keys_compare_bytewise() {
        let tree: BinarySearchTree<String> = ["b", "B", "a"].into_iter().map(String::from).collect();
        let names: Vec<&str> = tree.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
        assert!(tree.contains_key("a"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16),
        Remove(u16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u16..64).prop_map(Op::Insert),
            (0u16..64).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any interleaving of inserts and removes matches an
        /// ordered-set model and keeps the tree well ordered.
        #[test]
        fn behaves_like_an_ordered_set(ops in prop::collection::vec(op(), 0..200)) {
            let mut tree = BinarySearchTree::<u32>::new();
            let mut model = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(k) => {
                        let k = u32::from(k);
                        prop_assert_eq!(tree.insert(k).is_ok(), model.insert(k));
                    }
                    Op::Remove(k) => {
                        let k = u32::from(k);
                        prop_assert_eq!(tree.remove(&k).is_some(), model.remove(&k));
                    }
                }
                prop_assert!(tree.check_invariants().is_ok());
            }

            prop_assert_eq!(tree.len(), model.len());
            prop_assert_eq!(keys(&tree), model.into_iter().collect::<Vec<_>>());
        }
    }
}
