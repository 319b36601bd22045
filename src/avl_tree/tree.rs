use crate::avl_tree::node::Node;
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::cmp::Ordering;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update_height();
    child.left = Some(node);
    child.update_height();
    child
}

fn rotate_right<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update_height();
    child.right = Some(node);
    child.update_height();
    child
}

// Restores the AVL invariant at the root of `tree`, assuming both subtrees already satisfy it
// and their heights differ by at most two. The four cases are chosen by comparing the sign of
// the node's balance factor to the sign of the heavier child's: left-left takes a single right
// rotation, left-right rotates the left child left first, and the right cases mirror.
fn rebalance<T, U>(tree: &mut Tree<T, U>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update_height();

    if node.balance_factor() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance_factor() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance_factor() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance_factor() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

// precondition: there exists a maximum node in the tree
fn remove_max<T, U>(tree: &mut Tree<T, U>) -> Box<Node<T, U>> {
    let ret = match tree {
        Some(ref mut node) => {
            if node.right.is_some() {
                Some(remove_max(&mut node.right))
            } else {
                None
            }
        },
        None => unreachable!(),
    };

    match ret {
        Some(max_node) => {
            rebalance(tree);
            max_node
        },
        None => match tree.take() {
            Some(mut node) => {
                *tree = node.left.take();
                node
            },
            None => unreachable!(),
        },
    }
}

// Replaces a removed two-child node with its in-order predecessor, the maximum of the left
// subtree. `remove_max` rebalances every level of the left spine it unlinks from.
fn combine_subtrees<T, U>(mut left_tree: Tree<T, U>, right_tree: Tree<T, U>) -> Tree<T, U> {
    let mut new_root = remove_max(&mut left_tree);
    new_root.left = left_tree;
    new_root.right = right_tree;
    Some(new_root)
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Result<()>
where
    T: Ord,
{
    match tree {
        Some(ref mut node) => match new_node.entry.key.cmp(&node.entry.key) {
            Ordering::Less => insert(&mut node.left, new_node)?,
            Ordering::Greater => insert(&mut node.right, new_node)?,
            Ordering::Equal => return Err(Error::DuplicateKey),
        },
        None => {
            *tree = Some(Box::new(new_node));
            return Ok(());
        },
    }

    rebalance(tree);
    Ok(())
}

pub fn remove<T, U>(tree: &mut Tree<T, U>, key: &T) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(&node.entry.key) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                let unboxed_node = *node;
                let Node {
                    entry, left, right, ..
                } = unboxed_node;
                match (left, right) {
                    (None, right) => *tree = right,
                    (left, None) => *tree = left,
                    (left, right) => *tree = combine_subtrees(left, right),
                }
                Some(entry)
            },
        },
        None => return None,
    };

    rebalance(tree);
    ret
}

pub fn get<'a, T, U>(tree: &'a Tree<T, U>, key: &T) -> Option<&'a Entry<T, U>>
where
    T: Ord,
{
    tree.as_ref().and_then(|node| match key.cmp(&node.entry.key) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn get_mut<'a, T, U>(tree: &'a mut Tree<T, U>, key: &T) -> Option<&'a mut Entry<T, U>>
where
    T: Ord,
{
    tree.as_mut().and_then(|node| match key.cmp(&node.entry.key) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

pub fn ceil<'a, T, U>(tree: &'a Tree<T, U>, key: &T) -> Option<&'a Entry<T, U>>
where
    T: Ord,
{
    tree.as_ref().and_then(|node| match key.cmp(&node.entry.key) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn floor<'a, T, U>(tree: &'a Tree<T, U>, key: &T) -> Option<&'a Entry<T, U>>
where
    T: Ord,
{
    tree.as_ref().and_then(|node| match key.cmp(&node.entry.key) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

// Asserts the AVL and cached-height invariants for every node and returns the tree's height.
#[cfg(test)]
pub fn assert_balanced<T, U>(tree: &Tree<T, U>) -> usize
where
    T: Ord,
{
    match tree {
        None => 0,
        Some(ref node) => {
            if let Some(ref left_node) = node.left {
                assert!(left_node.entry.key < node.entry.key);
            }
            if let Some(ref right_node) = node.right {
                assert!(node.entry.key < right_node.entry.key);
            }
            let left_height = assert_balanced(&node.left);
            let right_height = assert_balanced(&node.right);
            assert!((left_height as i32 - right_height as i32).abs() <= 1);
            let expected = std::cmp::max(left_height, right_height) + 1;
            assert_eq!(node.height, expected);
            expected
        },
    }
}
