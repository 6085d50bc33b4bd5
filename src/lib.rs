//! Indexed d-ary min-heap
//!
//! This crate provides an array-backed min-heap generalized to branching
//! factor `d`, with the position tracking needed to delete or re-key an
//! arbitrary interior element in logarithmic time.
//!
//! # Features
//!
//! - **Handle-based access**: insertion returns a generational [`ItemKey`];
//!   stale handles are rejected, never dereferenced
//! - **`decrease_key`**: O(log_d n) via sift-up, the operation Dijkstra-style
//!   algorithms need
//! - **Arbitrary removal**: O(d log_d n) for any live item, not just the
//!   minimum
//! - **Linear-time bulk build** from an existing sequence
//! - **Comparison counting**: every mutating operation reports exactly how
//!   many key comparisons it made, and [`heap_sort`] reports the full cost of
//!   a sort
//!
//! # Example
//!
//! ```rust
//! use dheap::DaryHeap;
//!
//! # fn main() -> Result<(), dheap::HeapError> {
//! let mut heap = DaryHeap::new(3, 8)?;
//! let (handle, _) = heap.insert(5, "item")?;
//! heap.insert(3, "other")?;
//! heap.decrease_key(handle, 1)?;
//! assert_eq!(heap.peek(), Some((&1, &"item")));
//! # Ok(())
//! # }
//! ```

pub mod dary;
pub mod error;
pub mod sort;

// Re-export the main types for convenience
pub use dary::{child_index, parent_index, DaryHeap, ItemKey};
pub use error::HeapError;
pub use sort::heap_sort;
