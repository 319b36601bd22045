use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::binary_tree::BinaryTreeNode;
use crate::entry::Entry;
use crate::error::{Error, Result};
use std::mem;

/// An ordered map implemented by an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Insertions and removals
/// restore the invariant with rotations on the way back up the search path, so every operation
/// is logarithmic in the number of keys.
///
/// Unlike the maps in the standard library, insertion is strict: inserting a key that is already
/// present is an error and leaves the map untouched. Use [`put`](AvlMap::put) to replace the
/// value of an existing key.
///
/// # Examples
///
/// ```
/// use ordered_collections::avl_tree::AvlMap;
/// use ordered_collections::Error;
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1)?;
/// map.insert(3, 4)?;
///
/// assert_eq!(map.insert(3, 5), Err(Error::DuplicateKey));
/// assert_eq!(map.get(&0), Ok(&1));
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// assert_eq!(map.put(&0, 2), Ok(1));
/// assert_eq!(map.remove(&0), Ok((0, 2)));
/// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
/// # Ok::<(), Error>(())
/// ```
pub struct AvlMap<T, U> {
    root: tree::Tree<T, U>,
    len: usize,
}

impl<T, U> AvlMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap { root: None, len: 0 }
    }

    /// Inserts a key-value pair into the map. Returns `Err(Error::DuplicateKey)` without
    /// modifying the map if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<()> {
        tree::insert(&mut self.root, Node::new(key, value))?;
        self.len += 1;
        Ok(())
    }

    /// Removes a key-value pair from the map and returns it. Returns `Err(Error::KeyNotFound)`
    /// if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<(T, U)> {
        match tree::remove(&mut self.root, key) {
            Some(Entry { key, value }) => {
                self.len -= 1;
                Ok((key, value))
            },
            None => Err(Error::KeyNotFound),
        }
    }

    /// Replaces the value associated with an existing key and returns the previous value.
    /// Returns `Err(Error::KeyNotFound)` if the key is not present; `put` never inserts.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.put(&1, 2), Ok(1));
    /// assert_eq!(map.put(&5, 2), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&2));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn put(&mut self, key: &T, value: U) -> Result<U> {
        let old_value = self.get_mut(key)?;
        Ok(mem::replace(old_value, value))
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `Err(Error::KeyNotFound)` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.get(&0), Err(Error::KeyNotFound));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn get(&self, key: &T) -> Result<&U> {
        tree::get(&self.root, key)
            .map(|entry| &entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns
    /// `Err(Error::KeyNotFound)` if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// *map.get_mut(&1)? = 2;
    /// assert_eq!(map.get(&1), Ok(&2));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Result<&mut U> {
        tree::get_mut(&mut self.root, key)
            .map(|entry| &mut entry.value)
            .ok_or(Error::KeyNotFound)
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        tree::get(&self.root, key).is_some()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the smallest key greater than or equal to a particular key, or `None` if no such
    /// key exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        tree::ceil(&self.root, key).map(|entry| &entry.key)
    }

    /// Returns the largest key less than or equal to a particular key, or `None` if no such key
    /// exists.
    pub fn floor(&self, key: &T) -> Option<&T> {
        tree::floor(&self.root, key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map, or `None` if the map is empty.
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map, or `None` if the map is empty.
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root).map(|entry| &entry.key)
    }

    /// Returns a read-only view of the root node of the tree, or `None` if the map is empty.
    /// The view exposes the key and the child links of each node, which is the shape external
    /// tree renderers consume.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::{BinaryTreeNode, Error};
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, 2)?;
    /// map.insert(1, 1)?;
    /// map.insert(3, 3)?;
    ///
    /// let root = map.root().unwrap();
    /// assert_eq!(root.key(), &2);
    /// assert_eq!(root.left_child().map(|node| node.key()), Some(&1));
    /// assert_eq!(root.right_child().map(|node| node.key()), Some(&3));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn root(&self) -> Option<&impl BinaryTreeNode<Key = T>> {
        self.root.as_ref().map(|node| &**node)
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(3, 3)?;
    /// map.insert(1, 1)?;
    ///
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn keys(&self) -> AvlMapKeys<'_, T, U> {
        AvlMapKeys { inner: self.iter() }
    }

    /// Returns an iterator over the map that yields key-value pairs in ascending key order. The
    /// traversal keeps an explicit stack rather than recursing, so arbitrarily deep trees cannot
    /// overflow the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(3, 3)?;
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map that yields key-value pairs in ascending key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::avl_tree::AvlMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(3, 3)?;
    ///
    /// for (_, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// assert_eq!(map.get(&1), Ok(&2));
    /// assert_eq!(map.get(&3), Ok(&4));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn iter_mut(&mut self) -> AvlMapIterMut<'_, T, U> {
        AvlMapIterMut {
            current: self.root.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }
}

impl<T, U> IntoIterator for AvlMap<T, U>
where
    T: Ord,
{
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        AvlMapIntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a AvlMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut AvlMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = AvlMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields owned key-value pairs.
pub struct AvlMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, T: 'a, U: 'a> {
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T: 'a, U: 'a> Iterator for AvlMapIter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            let &Node {
                entry: Entry { ref key, ref value },
                ref right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// A mutable iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields mutable references to the
/// values.
pub struct AvlMapIterMut<'a, T: 'a, U: 'a> {
    current: Option<&'a mut Node<T, U>>,
    stack: Vec<(&'a mut Entry<T, U>, Option<&'a mut Node<T, U>>)>,
}

impl<'a, T: 'a, U: 'a> Iterator for AvlMapIterMut<'a, T, U> {
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        let AvlMapIterMut {
            ref mut current,
            ref mut stack,
        } = *self;
        while let Some(node) = current.take() {
            *current = node.left.as_mut().map(|node| &mut **node);
            stack.push((&mut node.entry, node.right.as_mut().map(|node| &mut **node)));
        }
        stack.pop().map(|(entry, right)| {
            let Entry { ref key, ref mut value } = *entry;
            *current = right;
            (key, value)
        })
    }
}

/// An iterator over the keys of an `AvlMap<T, U>` in ascending order.
pub struct AvlMapKeys<'a, T: 'a, U: 'a> {
    inner: AvlMapIter<'a, T, U>,
}

impl<'a, T: 'a, U: 'a> Iterator for AvlMapKeys<'a, T, U> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| pair.0)
    }
}

impl<T, U> Default for AvlMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
