use crate::binary_tree::BinaryTreeNode;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::treap::node::Node;
use crate::treap::tree;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::cmp;
use std::mem;

/// An ordered map implemented by a treap.
///
/// A treap is a binary search tree in which every node also carries a random priority, and the
/// tree maintains a min-heap order over those priorities: the priority of a node is less than
/// or equal to the priorities of its children. Random priorities keep the expected height
/// proportional to the logarithm of the number of keys.
///
/// The priority generator is owned by the map. [`with_seed`](TreapMap::with_seed) constructs a
/// map whose shape is fully determined by the seed and the sequence of operations, which makes
/// randomized structure reproducible across runs.
///
/// Insertion is strict: inserting a key that is already present is an error and leaves the map
/// untouched. Use [`put`](TreapMap::put) to replace the value of an existing key.
///
/// # Examples
///
/// ```
/// use ordered_collections::treap::TreapMap;
/// use ordered_collections::Error;
///
/// let mut map = TreapMap::new();
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
pub struct TreapMap<T, U> {
    root: tree::Tree<T, U>,
    rng: XorShiftRng,
    len: usize,
}

impl<T, U> TreapMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `TreapMap<T, U>` with priorities seeded from thread-local
    /// entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Constructs a new, empty `TreapMap<T, U>` whose priority generator is seeded with
    /// `seed`. Two maps constructed with the same seed and fed the same sequence of operations
    /// have identical shapes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::with_seed(12345);
    /// ```
    pub fn with_seed(seed: u64) -> Self {
        // XorShiftRng rejects an all-zero seed, so pad with non-zero constants.
        let seed = [seed as u32, (seed >> 32) as u32, 0x9e37_79b9, 0x85eb_ca6b];
        TreapMap {
            root: None,
            rng: XorShiftRng::from_seed(seed),
            len: 0,
        }
    }

    /// Inserts a key-value pair into the map. Returns `Err(Error::DuplicateKey)` without
    /// modifying the map if the key is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Ok(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<()> {
        // The sentinel is reserved for removal, so clamp the draw below it.
        let priority = cmp::min(self.rng.next_u32(), tree::SENTINEL_PRIORITY - 1);
        tree::insert(&mut self.root, Node::new(key, value, priority))?;
        self.len += 1;
        Ok(())
    }

    /// Removes a key-value pair from the map and returns it. Returns `Err(Error::KeyNotFound)`
    /// if the key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1)?;
    /// assert_eq!(map.put(&1, 2), Ok(1));
    /// assert_eq!(map.put(&5, 2), Err(Error::KeyNotFound));
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
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
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
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
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
    /// tree renderers consume. Priorities stay private.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::{BinaryTreeNode, Error};
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1)?;
    ///
    /// assert_eq!(map.root().map(|node| node.key()), Some(&1));
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
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(3, 3)?;
    /// map.insert(1, 1)?;
    ///
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &3]);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn keys(&self) -> TreapMapKeys<'_, T, U> {
        TreapMapKeys { inner: self.iter() }
    }

    /// Returns an iterator over the map that yields key-value pairs in ascending key order. The
    /// traversal keeps an explicit stack rather than recursing, so arbitrarily deep trees cannot
    /// overflow the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::treap::TreapMap;
    /// use ordered_collections::Error;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1)?;
    /// map.insert(3, 3)?;
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn iter(&self) -> TreapMapIter<'_, T, U> {
        TreapMapIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map that yields key-value pairs in ascending key
    /// order.
    pub fn iter_mut(&mut self) -> TreapMapIterMut<'_, T, U> {
        TreapMapIterMut {
            current: self.root.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }
}

impl<T, U> IntoIterator for TreapMap<T, U>
where
    T: Ord,
{
    type IntoIter = TreapMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        TreapMapIntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a TreapMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = TreapMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut TreapMap<T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type IntoIter = TreapMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields owned key-value pairs.
pub struct TreapMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
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

/// An iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields immutable references.
pub struct TreapMapIter<'a, T: 'a, U: 'a> {
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T: 'a, U: 'a> Iterator for TreapMapIter<'a, T, U> {
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

/// A mutable iterator for `TreapMap<T, U>`.
///
/// This iterator traverses the entries of the map in-order and yields mutable references to the
/// values.
pub struct TreapMapIterMut<'a, T: 'a, U: 'a> {
    current: Option<&'a mut Node<T, U>>,
    stack: Vec<(&'a mut Entry<T, U>, Option<&'a mut Node<T, U>>)>,
}

impl<'a, T: 'a, U: 'a> Iterator for TreapMapIterMut<'a, T, U> {
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        let TreapMapIterMut {
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

/// An iterator over the keys of a `TreapMap<T, U>` in ascending order.
pub struct TreapMapKeys<'a, T: 'a, U: 'a> {
    inner: TreapMapIter<'a, T, U>,
}

impl<'a, T: 'a, U: 'a> Iterator for TreapMapKeys<'a, T, U> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|pair| pair.0)
    }
}

impl<T, U> Default for TreapMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TreapMap;
    use crate::error::Error;
    use crate::treap::node::Node;
    use crate::treap::tree;
    use rand::{Rng, SeedableRng, XorShiftRng};

    fn assert_invariants<T: Ord, U>(map: &TreapMap<T, U>) {
        tree::assert_heap_order(&map.root);
    }

    #[test]
    fn test_len_empty() {
        let map: TreapMap<u32, u32> = TreapMap::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert() {
        let mut map = TreapMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Ok(&1));
        assert_invariants(&map);
    }

    #[test]
    fn test_insert_duplicate_is_rejected() {
        let mut map = TreapMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert_eq!(map.insert(1, 3), Err(Error::DuplicateKey));
        assert_eq!(map.get(&1), Ok(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Ok((1, 1)));
        assert!(!map.contains_key(&1));
        assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_put() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.put(&1, 5), Ok(1));
        assert_eq!(map.get(&1), Ok(&5));
        assert_eq!(map.put(&2, 5), Err(Error::KeyNotFound));
    }

    #[test]
    fn test_get_mut() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        *map.get_mut(&1).unwrap() = 3;
        assert_eq!(map.get(&1), Ok(&3));
    }

    #[test]
    fn test_min_max_floor_ceil() {
        let mut map = TreapMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_invariants_under_churn() {
        let mut map = TreapMap::with_seed(98765);
        for key in 0..256 {
            map.insert(key, key).unwrap();
            assert_invariants(&map);
        }
        for key in (0..256).step_by(2) {
            assert_eq!(map.remove(&key), Ok((key, key)));
            assert_invariants(&map);
        }
        assert_eq!(map.len(), 128);
    }

    #[test]
    fn test_invariants_under_random_churn() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut map = TreapMap::with_seed(31_415);
        let mut keys = Vec::new();
        for _ in 0..1_000 {
            let key = rng.gen::<u32>();
            if map.insert(key, key).is_ok() {
                keys.push(key);
            }
            assert_invariants(&map);
        }
        for key in keys {
            assert_eq!(map.remove(&key), Ok((key, key)));
            assert_invariants(&map);
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_same_seed_same_shape() {
        let keys = [13, 7, 42, 1, 99, 56, 23, 8, 77, 3];
        let mut lhs = TreapMap::with_seed(42);
        let mut rhs = TreapMap::with_seed(42);
        for key in &keys {
            lhs.insert(*key, *key).unwrap();
            rhs.insert(*key, *key).unwrap();
        }
        assert!(tree::shape_eq(&lhs.root, &rhs.root));

        let mut other = TreapMap::with_seed(43);
        for key in &keys {
            other.insert(*key, *key).unwrap();
        }
        // A different seed almost surely yields a different shape for ten keys.
        assert!(!tree::shape_eq(&lhs.root, &other.root));
    }

    #[test]
    fn test_priority_never_collides_with_sentinel() {
        let mut map = TreapMap::with_seed(7);
        for key in 0..512 {
            map.insert(key, key).unwrap();
        }
        fn assert_below_sentinel<T, U>(tree: &tree::Tree<T, U>) {
            if let Some(ref node) = *tree {
                assert!(node.priority < tree::SENTINEL_PRIORITY);
                assert_below_sentinel(&node.left);
                assert_below_sentinel(&node.right);
            }
        }
        assert_below_sentinel(&map.root);
    }

    #[test]
    fn test_remove_with_tied_priorities() {
        // Force every priority to the clamp boundary; removal must still reach a leaf and
        // preserve both invariants despite the ties.
        let mut map: TreapMap<u32, u32> = TreapMap::with_seed(1);
        for key in 0..32 {
            let node = Node::new(key, key, tree::SENTINEL_PRIORITY - 1);
            tree::insert(&mut map.root, node).unwrap();
            map.len += 1;
        }
        for key in 0..32 {
            assert_eq!(map.remove(&key), Ok((key, key)));
            assert_invariants(&map);
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_into_iter() {
        let mut map = TreapMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = TreapMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = TreapMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        for (_, value) in &mut map {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }
}
