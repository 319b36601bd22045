/// A read-only view of a binary tree node: a key and optional child links.
///
/// Both tree-backed maps expose their root through this trait so external collaborators, such
/// as tree renderers, can walk the structure without access to values, priorities, or any
/// mutable state.
pub trait BinaryTreeNode {
    type Key;

    /// The key of the node.
    fn key(&self) -> &Self::Key;

    /// The root of the left subtree, or `None` if the node has no left child.
    fn left_child(&self) -> Option<&Self>;

    /// The root of the right subtree, or `None` if the node has no right child.
    fn right_child(&self) -> Option<&Self>;
}
