//! Ordered map and priority queue implementations.
//!
//! The two maps share a contract — strict keyed insertion, removal, lookup, and ascending key
//! iteration — and differ only in how they stay balanced: `avl_tree` maintains a height bound
//! with rotations, `treap` maintains a heap order over random priorities. `binary_heap` is an
//! array-backed priority queue with a pluggable ordering policy.

mod binary_tree;
mod entry;
mod error;

pub mod avl_tree;
pub mod binary_heap;
pub mod treap;

pub use self::binary_tree::BinaryTreeNode;
pub use self::error::{Error, Result};
