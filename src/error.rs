use thiserror::Error;

/// The errors that map and priority queue operations can return.
///
/// No operation that returns an error performs any mutation; a failed `insert` or `remove`
/// leaves the structure exactly as it was.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// The key passed to `insert` already exists in the map.
    #[error("key already exists in the map")]
    DuplicateKey,
    /// The key passed to `get`, `get_mut`, `put`, or `remove` does not exist in the map.
    #[error("key not found in the map")]
    KeyNotFound,
    /// `remove` or `best` was called on a priority queue with no elements.
    #[error("priority queue is empty")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, Error>;
