use crate::binary_tree::BinaryTreeNode;
use crate::entry::Entry;
use crate::treap::tree;
use std::mem;

/// A node of a treap. The priority is drawn from the map's random generator when the node is
/// created and never changes afterward, except when the node is being removed and is forced
/// down to a leaf with the sentinel priority.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub priority: u32,
    pub left: tree::Tree<T, U>,
    pub right: tree::Tree<T, U>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, priority: u32) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            left: None,
            right: None,
        }
    }

    /// Returns `true` if `child` has a smaller priority than this node, which violates the
    /// min-heap order on priorities.
    pub fn heap_order_violated(&self, child: &tree::Tree<T, U>) -> bool {
        match child {
            Some(ref child_node) => child_node.priority < self.priority,
            None => false,
        }
    }

    pub fn rotate_left(&mut self) {
        let mut child = self
            .right
            .take()
            .expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        self.left = Some(child);
    }

    pub fn rotate_right(&mut self) {
        let mut child = self
            .left
            .take()
            .expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        self.right = Some(child);
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
