use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::slice;
use std::vec;

/// An ordering policy for priority queue elements.
///
/// `compare` returning `Ordering::Greater` means `lhs` outranks `rhs`. Any closure of type
/// `Fn(&T, &T) -> Ordering` is a policy, so a min-queue over a naturally ordered type is just
/// `|lhs, rhs| rhs.cmp(lhs)`.
pub trait Compare<T> {
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// The natural ordering of `T`: the maximum element is the best.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrd;

impl<T> Compare<T> for NaturalOrd
where
    T: Ord,
{
    fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// A priority queue implemented by a binary heap over a ranked array.
///
/// The heap is conceptually one-indexed: the element of rank `i` has its parent at rank
/// `i / 2` and its children at ranks `2i` and `2i + 1`, and rank `i` lives at index `i - 1` of
/// the backing vector. Every element is not worse — per the queue's ordering policy — than
/// either of its children, so the best element is always at rank 1.
///
/// # Examples
///
/// ```
/// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
/// use ordered_collections::Error;
///
/// let mut queue = BinaryHeapPriorityQueue::new();
/// for element in &[3, 1, 4, 1, 5, 9, 2, 6] {
///     queue.insert(*element);
/// }
///
/// assert_eq!(queue.best(), Ok(&9));
/// assert_eq!(queue.remove(), Ok(9));
/// assert_eq!(queue.best(), Ok(&6));
/// # Ok::<(), Error>(())
/// ```
pub struct BinaryHeapPriorityQueue<T, C = NaturalOrd> {
    heap: Vec<T>,
    cmp: C,
}

impl<T> BinaryHeapPriorityQueue<T, NaturalOrd>
where
    T: Ord,
{
    /// Constructs a new, empty `BinaryHeapPriorityQueue<T>` ordered naturally, with the maximum
    /// element as the best.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    ///
    /// let queue: BinaryHeapPriorityQueue<u32> = BinaryHeapPriorityQueue::new();
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrd)
    }
}

impl<T, C> BinaryHeapPriorityQueue<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `BinaryHeapPriorityQueue<T, C>` with a custom ordering policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    /// use ordered_collections::Error;
    ///
    /// let mut queue = BinaryHeapPriorityQueue::with_comparator(|lhs: &u32, rhs: &u32| rhs.cmp(lhs));
    /// queue.insert(3);
    /// queue.insert(1);
    /// queue.insert(2);
    /// assert_eq!(queue.best(), Ok(&1));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        BinaryHeapPriorityQueue {
            heap: Vec::new(),
            cmp,
        }
    }

    /// Returns the number of elements in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if the queue has no elements.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn element(&self, rank: usize) -> &T {
        &self.heap[rank - 1]
    }

    fn swap(&mut self, lhs: usize, rhs: usize) {
        self.heap.swap(lhs - 1, rhs - 1);
    }

    fn sift_up(&mut self, mut rank: usize) {
        while rank > 1 {
            let parent = rank / 2;
            if self.cmp.compare(self.element(parent), self.element(rank)) == Ordering::Less {
                self.swap(parent, rank);
                rank = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut rank: usize) {
        loop {
            let left = 2 * rank;
            let right = 2 * rank + 1;
            let mut best = rank;
            if left <= self.len()
                && self.cmp.compare(self.element(left), self.element(best)) == Ordering::Greater
            {
                best = left;
            }
            if right <= self.len()
                && self.cmp.compare(self.element(right), self.element(best)) == Ordering::Greater
            {
                best = right;
            }
            if best == rank {
                return;
            }
            self.swap(rank, best);
            rank = best;
        }
    }

    /// Inserts an element into the queue. The element is appended at the last rank and sifted
    /// up until its parent is not worse than it. Duplicate elements are allowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    /// use ordered_collections::Error;
    ///
    /// let mut queue = BinaryHeapPriorityQueue::new();
    /// queue.insert(1);
    /// queue.insert(5);
    /// assert_eq!(queue.best(), Ok(&5));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn insert(&mut self, element: T) {
        self.heap.push(element);
        self.sift_up(self.len());
    }

    /// Removes the best element from the queue and returns it. The last rank replaces rank 1
    /// and is sifted down, swapping with the best of its children until it is not worse than
    /// either. Returns `Err(Error::EmptyQueue)` if the queue has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    /// use ordered_collections::Error;
    ///
    /// let mut queue = BinaryHeapPriorityQueue::new();
    /// queue.insert(1);
    /// queue.insert(5);
    /// assert_eq!(queue.remove(), Ok(5));
    /// assert_eq!(queue.remove(), Ok(1));
    /// assert_eq!(queue.remove(), Err(Error::EmptyQueue));
    /// ```
    pub fn remove(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyQueue);
        }
        let last = self.len();
        self.swap(1, last);
        let best = match self.heap.pop() {
            Some(element) => element,
            None => unreachable!(),
        };
        self.sift_down(1);
        Ok(best)
    }

    /// Returns a reference to the best element of the queue, or `Err(Error::EmptyQueue)` if the
    /// queue has no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    /// use ordered_collections::Error;
    ///
    /// let mut queue = BinaryHeapPriorityQueue::new();
    /// assert_eq!(queue.best(), Err(Error::EmptyQueue));
    /// queue.insert(1);
    /// assert_eq!(queue.best(), Ok(&1));
    /// ```
    pub fn best(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyQueue);
        }
        Ok(self.element(1))
    }

    /// Returns an iterator over the elements of the queue in rank (storage) order. No ordering
    /// is guaranteed beyond rank 1 being the best element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_collections::binary_heap::BinaryHeapPriorityQueue;
    ///
    /// let mut queue = BinaryHeapPriorityQueue::new();
    /// queue.insert(1);
    /// queue.insert(5);
    /// queue.insert(3);
    /// assert_eq!(queue.iter().next(), Some(&5));
    /// assert_eq!(queue.iter().count(), 3);
    /// ```
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.heap.iter()
    }
}

impl<T, C> IntoIterator for BinaryHeapPriorityQueue<T, C> {
    type IntoIter = vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.heap.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a BinaryHeapPriorityQueue<T, C>
where
    C: Compare<T>,
{
    type IntoIter = slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for BinaryHeapPriorityQueue<T, NaturalOrd>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
