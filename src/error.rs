//! Error type for heap operations
//!
//! Every failure in this crate is a violated precondition rather than a
//! recoverable runtime state. Operations validate their inputs up front and
//! return one of these variants before touching any heap state, so an `Err`
//! never leaves a heap partially mutated.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The branching factor must be at least 2
    ArityTooSmall,
    /// The capacity must be positive
    ZeroCapacity,
    /// The operation would grow the heap past its fixed capacity
    CapacityExceeded,
    /// The handle does not refer to an item currently in this heap
    InvalidHandle,
    /// The new key is greater than the item's current key
    KeyNotDecreased,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::ArityTooSmall => {
                write!(f, "branching factor must be at least 2")
            }
            HeapError::ZeroCapacity => {
                write!(f, "capacity must be positive")
            }
            HeapError::CapacityExceeded => {
                write!(f, "heap is at its fixed capacity")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle does not refer to an item currently in this heap")
            }
            HeapError::KeyNotDecreased => {
                write!(f, "new key is greater than the item's current key")
            }
        }
    }
}

impl std::error::Error for HeapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            HeapError::ArityTooSmall.to_string(),
            "branching factor must be at least 2"
        );
        assert_eq!(
            HeapError::KeyNotDecreased.to_string(),
            "new key is greater than the item's current key"
        );
    }
}
