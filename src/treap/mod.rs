//! Randomized binary search tree where each node also maintains a min-heap order on priorities
//! drawn from a seedable random generator.

mod map;
mod node;
mod tree;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter, TreapMapIterMut, TreapMapKeys};
