//! Comparison-counting heap-sort built on [`DaryHeap`]
//!
//! The driver uses the heap purely as a sorting engine: wrap every scalar in
//! an item with a unit payload, bulk-build, then repeatedly pop the minimum
//! back into the input slice. Note this is not an in-place heap-sort in the
//! classic array sense: the heap holds O(n) auxiliary items for the duration
//! of the sort.

use crate::dary::DaryHeap;
use crate::error::HeapError;

/// Sorts `values` ascending through a d-ary heap of the given branching
/// factor, returning the total number of key comparisons spent on the build
/// plus every extraction.
///
/// An empty slice costs zero comparisons.
///
/// # Errors
/// [`HeapError::ArityTooSmall`] if `arity < 2`.
///
/// # Example
///
/// ```rust
/// let mut values = [7, 2, 9, 1, 5, 3, 8];
/// let comparisons = dheap::heap_sort(&mut values, 3).unwrap();
/// assert_eq!(values, [1, 2, 3, 5, 7, 8, 9]);
/// assert!(comparisons > 0);
/// ```
pub fn heap_sort<K: Ord + Copy>(values: &mut [K], arity: usize) -> Result<u64, HeapError> {
    if arity < 2 {
        return Err(HeapError::ArityTooSmall);
    }
    if values.is_empty() {
        return Ok(0);
    }

    let mut heap: DaryHeap<K, ()> = DaryHeap::new(arity, values.len())?;
    let (_, mut comparisons) = heap.build_from(values.iter().map(|&key| (key, ())))?;
    for slot in values.iter_mut() {
        if let Some((key, _, count)) = heap.pop() {
            *slot = key;
            comparisons += count;
        }
    }
    Ok(comparisons)
}
