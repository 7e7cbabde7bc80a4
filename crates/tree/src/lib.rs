//! `lootbag-tree`: an unbalanced, arena-backed binary search tree.
//!
//! Nodes live in a slot vector and link to each other through [`NodeId`]s.
//! Removed slots go on a free list and are handed out again by the next
//! insert, so ids of untouched nodes stay stable across mutations.
//!
//! The tree does not rebalance. Keys are unique: inserting a key that is
//! already present hands the value back to the caller.

mod iter;
mod tree;

pub use iter::{IntoIter, Iter};
pub use tree::{BinarySearchTree, NodeId, NodeRef};

/// Values that carry their own ordering key.
pub trait Keyed {
    type Key: Ord + ?Sized;

    fn key(&self) -> &Self::Key;
}

impl Keyed for String {
    type Key = str;

    fn key(&self) -> &str {
        self
    }
}

macro_rules! impl_keyed_by_value {
    ($($t:ty),*) => {
        $(
            impl Keyed for $t {
                type Key = $t;

                fn key(&self) -> &$t {
                    self
                }
            }
        )*
    };
}

impl_keyed_by_value!(u32, u64, i32, i64, usize);
