use crate::avl_tree::tree;
use crate::binary_tree::BinaryTreeNode;
use crate::entry::Entry;
use std::cmp;

/// A node of an AVL tree. The height of the subtree rooted at the node is cached and kept
/// current on the bottom-up return pass of every insert and remove, so rebalancing checks are
/// O(1) per ancestor.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub height: usize,
    pub left: tree::Tree<T, U>,
    pub right: tree::Tree<T, U>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            height: 1,
            left: None,
            right: None,
        }
    }

    pub fn update_height(&mut self) {
        self.height = cmp::max(tree::height(&self.left), tree::height(&self.right)) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. The AVL invariant
    /// keeps this in [-1, 1] for every node.
    pub fn balance_factor(&self) -> i32 {
        (tree::height(&self.left) as i32) - (tree::height(&self.right) as i32)
    }
}

impl<T, U> BinaryTreeNode for Node<T, U> {
    type Key = T;

    fn key(&self) -> &T {
        &self.entry.key
    }

    fn left_child(&self) -> Option<&Self> {
        self.left.as_ref().map(|node| &**node)
    }

    fn right_child(&self) -> Option<&Self> {
        self.right.as_ref().map(|node| &**node)
    }
}
