//! Array-backed priority queue with a ranked binary heap representation and a pluggable
//! ordering policy.

mod queue;

pub use self::queue::{BinaryHeapPriorityQueue, Compare, NaturalOrd};
