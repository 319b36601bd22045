use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::treap::node::Node;
use std::cmp::Ordering;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

/// Priority reserved for nodes being removed. Generated priorities never take this value, so a
/// doomed node loses every priority comparison on its way down to a leaf.
pub const SENTINEL_PRIORITY: u32 = u32::MAX;

enum RemovalCase {
    SpliceOut,
    RotateLeft,
    RotateRight,
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Result<()>
where
    T: Ord,
{
    match *tree {
        Some(ref mut node) => {
            match new_node.entry.key.cmp(&node.entry.key) {
                Ordering::Less => {
                    insert(&mut node.left, new_node)?;
                    if node.heap_order_violated(&node.left) {
                        node.rotate_right();
                    }
                },
                Ordering::Greater => {
                    insert(&mut node.right, new_node)?;
                    if node.heap_order_violated(&node.right) {
                        node.rotate_left();
                    }
                },
                Ordering::Equal => return Err(Error::DuplicateKey),
            }
            Ok(())
        },
        None => {
            *tree = Some(Box::new(new_node));
            Ok(())
        },
    }
}

fn removal_case<T, U>(tree: &Tree<T, U>) -> Option<RemovalCase> {
    tree.as_ref().map(|node| match (&node.left, &node.right) {
        (&Some(ref left_node), &Some(ref right_node)) => {
            if left_node.priority < right_node.priority {
                RemovalCase::RotateRight
            } else {
                RemovalCase::RotateLeft
            }
        },
        (&Some(_), &None) => RemovalCase::RotateRight,
        (&None, &Some(_)) => RemovalCase::RotateLeft,
        (&None, &None) => RemovalCase::SpliceOut,
    })
}

// Rotates the doomed root of `tree` downward, always promoting the child with the smaller
// priority, until it reaches a leaf position and can be spliced out. Every intermediate tree
// satisfies both the key order and the heap order on priorities.
fn rotate_to_leaf<T, U>(tree: &mut Tree<T, U>) -> Option<Entry<T, U>> {
    removal_case(tree).and_then(|case| match case {
        RemovalCase::RotateRight => tree.as_mut().and_then(|node| {
            node.rotate_right();
            rotate_to_leaf(&mut node.right)
        }),
        RemovalCase::RotateLeft => tree.as_mut().and_then(|node| {
            node.rotate_left();
            rotate_to_leaf(&mut node.left)
        }),
        RemovalCase::SpliceOut => tree.take().map(|node| node.entry),
    })
}

pub fn remove<T, U>(tree: &mut Tree<T, U>, key: &T) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let ordering = match tree.as_ref() {
        Some(node) => key.cmp(&node.entry.key),
        None => return None,
    };
    match ordering {
        Ordering::Less => tree.as_mut().and_then(|node| remove(&mut node.left, key)),
        Ordering::Greater => tree.as_mut().and_then(|node| remove(&mut node.right, key)),
        Ordering::Equal => {
            if let Some(ref mut node) = *tree {
                node.priority = SENTINEL_PRIORITY;
            }
            rotate_to_leaf(tree)
        },
    }
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

// Asserts the key order and the min-heap order on priorities for every node.
#[cfg(test)]
pub fn assert_heap_order<T, U>(tree: &Tree<T, U>)
where
    T: Ord,
{
    if let Some(ref node) = *tree {
        if let Some(ref left_node) = node.left {
            assert!(left_node.entry.key < node.entry.key);
            assert!(node.priority <= left_node.priority);
        }
        if let Some(ref right_node) = node.right {
            assert!(node.entry.key < right_node.entry.key);
            assert!(node.priority <= right_node.priority);
        }
        assert_heap_order(&node.left);
        assert_heap_order(&node.right);
    }
}

// Structural equality over keys and priorities.
#[cfg(test)]
pub fn shape_eq<T, U>(lhs: &Tree<T, U>, rhs: &Tree<T, U>) -> bool
where
    T: Ord,
{
    match (lhs, rhs) {
        (None, None) => true,
        (Some(ref lhs_node), Some(ref rhs_node)) => {
            lhs_node.entry.key == rhs_node.entry.key
                && lhs_node.priority == rhs_node.priority
                && shape_eq(&lhs_node.left, &rhs_node.left)
                && shape_eq(&lhs_node.right, &rhs_node.right)
        },
        _ => false,
    }
}
