//! Array-backed d-ary min-heap with handle-based interior access
//!
//! A [`DaryHeap`] is the classic array layout generalized to branching factor
//! `d`: the children of the node at index `i` live at indices
//! `d*i + 1 ..= d*i + d`. On top of that layout it keeps a back-pointer from
//! every item to its current slot, which is what makes arbitrary removal and
//! `decrease_key` logarithmic instead of linear.
//!
//! Items live in a [`slotmap::SlotMap`] arena and the heap array stores their
//! keys, so callers hold a small `Copy` handle ([`ItemKey`]) instead of a
//! reference into the heap. A handle for a removed item stops resolving
//! (generational keys), so use-after-remove surfaces as
//! [`HeapError::InvalidHandle`] rather than touching a recycled slot.
//!
//! Every mutating operation reports the exact number of key comparisons it
//! performed: sift-down counts one comparison per child examined, sift-up one
//! per parent probe. The counts are deterministic for a given input.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity             |
//! |------------------|------------------------|
//! | `insert`         | O(log_d n)             |
//! | `peek`           | O(1)                   |
//! | `pop`            | O(d log_d n)           |
//! | `remove`         | O(d log_d n)           |
//! | `decrease_key`   | O(log_d n)             |
//! | `build_from`     | O(n)                   |
//!
//! # Example
//!
//! ```rust
//! use dheap::DaryHeap;
//!
//! # fn main() -> Result<(), dheap::HeapError> {
//! let mut heap: DaryHeap<i32, &str> = DaryHeap::new(4, 16)?;
//! let (five, _) = heap.insert(5, "five")?;
//! heap.insert(3, "three")?;
//! heap.decrease_key(five, 1)?;
//! assert_eq!(heap.peek(), Some((&1, &"five")));
//! # Ok(())
//! # }
//! ```

use slotmap::{new_key_type, SlotMap};

use crate::error::HeapError;

new_key_type! {
    /// Generational handle to an item living in a [`DaryHeap`].
    ///
    /// Obtained from [`DaryHeap::insert`] or [`DaryHeap::build_from`]; stops
    /// resolving once the item leaves the heap.
    pub struct ItemKey;
}

/// Index of the parent of the node at `index` in a complete d-ary tree,
/// `(index - 1) / d`. The root maps to itself.
#[inline]
pub fn parent_index(index: usize, arity: usize) -> usize {
    index.saturating_sub(1) / arity
}

/// Index of the `k`-th child of the node at `index`, `d * index + k`.
/// Valid for `1 <= k <= d`.
#[inline]
pub fn child_index(index: usize, k: usize, arity: usize) -> usize {
    arity * index + k
}

/// A keyed entry in the heap's arena.
///
/// `pos` is the item's current slot in the heap array. The owning heap is the
/// only writer; it goes stale the moment the item is removed, but the
/// generational [`ItemKey`] stops resolving at the same moment, so a stale
/// position is unobservable through the public API.
#[derive(Debug)]
struct Item<K, T> {
    key: K,
    pos: usize,
    payload: T,
}

/// Array-backed min-heap with branching factor `d` and fixed capacity.
///
/// Keys are totally ordered scalars (`Ord + Copy`); payloads are opaque to the
/// heap. Capacity is set at construction and never grows: inserting into a
/// full heap is a contract violation ([`HeapError::CapacityExceeded`]), not a
/// resize trigger.
///
/// The heap is single-threaded and gives no atomicity guarantees across
/// calls; wrap it in a mutex externally if shared access is needed.
#[derive(Debug)]
pub struct DaryHeap<K: Ord + Copy, T> {
    /// Arena owning the items; an item is present here iff it is live in `heap`.
    items: SlotMap<ItemKey, Item<K, T>>,
    /// The heap array. `heap[i]` is the item occupying slot `i`.
    heap: Vec<ItemKey>,
    arity: usize,
    capacity: usize,
}

impl<K: Ord + Copy, T> DaryHeap<K, T> {
    /// Creates an empty heap with the given branching factor and capacity.
    ///
    /// # Errors
    /// [`HeapError::ArityTooSmall`] if `arity < 2`,
    /// [`HeapError::ZeroCapacity`] if `capacity == 0`.
    pub fn new(arity: usize, capacity: usize) -> Result<Self, HeapError> {
        if arity < 2 {
            return Err(HeapError::ArityTooSmall);
        }
        if capacity == 0 {
            return Err(HeapError::ZeroCapacity);
        }
        Ok(DaryHeap {
            items: SlotMap::with_capacity_and_key(capacity),
            heap: Vec::with_capacity(capacity),
            arity,
            capacity,
        })
    }

    /// Returns the number of items currently in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the heap holds no items
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the branching factor fixed at construction
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the capacity fixed at construction
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if `handle` refers to an item currently in this heap
    pub fn contains(&self, handle: ItemKey) -> bool {
        self.items.contains_key(handle)
    }

    /// Returns the key and payload of a live item, or `None` for a stale handle
    pub fn get(&self, handle: ItemKey) -> Option<(&K, &T)> {
        self.items.get(handle).map(|item| (&item.key, &item.payload))
    }

    /// Returns the key of a live item, or `None` for a stale handle
    pub fn key(&self, handle: ItemKey) -> Option<&K> {
        self.items.get(handle).map(|item| &item.key)
    }

    /// Replaces the heap's entire contents with `entries` and heapifies.
    ///
    /// Each entry starts at the slot matching its position in the input, then
    /// every non-leaf slot from `(len - 2) / d` down to the root is sifted
    /// down. Leaves already satisfy the heap property, and processing parents
    /// bottom-up means both subtrees of a node are heaps by the time it is
    /// sifted, which is what makes the build linear-time.
    ///
    /// Returns one handle per entry, in input order, plus the total number of
    /// key comparisons. Previously issued handles stop resolving.
    ///
    /// # Errors
    /// [`HeapError::CapacityExceeded`] if the input is longer than the heap's
    /// capacity; the heap is left untouched in that case.
    pub fn build_from<I>(&mut self, entries: I) -> Result<(Vec<ItemKey>, u64), HeapError>
    where
        I: IntoIterator<Item = (K, T)>,
    {
        let entries: Vec<(K, T)> = entries.into_iter().collect();
        if entries.len() > self.capacity {
            return Err(HeapError::CapacityExceeded);
        }

        self.items.clear();
        self.heap.clear();
        let mut handles = Vec::with_capacity(entries.len());
        for (pos, (key, payload)) in entries.into_iter().enumerate() {
            let handle = self.items.insert(Item { key, pos, payload });
            self.heap.push(handle);
            handles.push(handle);
        }

        let mut comparisons = 0;
        if self.heap.len() >= 2 {
            for i in (0..=(self.heap.len() - 2) / self.arity).rev() {
                comparisons += self.sift_down(i);
            }
        }
        Ok((handles, comparisons))
    }

    /// Inserts an item at the last slot and sifts it up.
    ///
    /// Returns the item's handle and the number of comparisons made.
    ///
    /// # Errors
    /// [`HeapError::CapacityExceeded`] if the heap is full.
    pub fn insert(&mut self, key: K, payload: T) -> Result<(ItemKey, u64), HeapError> {
        if self.heap.len() == self.capacity {
            return Err(HeapError::CapacityExceeded);
        }
        let pos = self.heap.len();
        let handle = self.items.insert(Item { key, pos, payload });
        self.heap.push(handle);
        let comparisons = self.sift_up(pos);
        Ok((handle, comparisons))
    }

    /// Returns the minimum-key item without removing it
    pub fn peek(&self) -> Option<(&K, &T)> {
        self.heap.first().map(|&handle| {
            let item = &self.items[handle];
            (&item.key, &item.payload)
        })
    }

    /// Returns the handle of the minimum-key item without removing it
    pub fn min_handle(&self) -> Option<ItemKey> {
        self.heap.first().copied()
    }

    /// Removes and returns the minimum-key item.
    ///
    /// Returns the key, payload, and number of comparisons, or `None` if the
    /// heap is empty.
    pub fn pop(&mut self) -> Option<(K, T, u64)> {
        let root = *self.heap.first()?;
        // The handle was just read from the live array, so remove cannot fail.
        self.remove(root).ok()
    }

    /// Removes an arbitrary live item.
    ///
    /// The last item moves into the vacated slot and is sifted down; when the
    /// sift-down makes no swap, a sift-up runs from the same slot instead. A
    /// single downward pass is not always enough: the moved-in item can be
    /// smaller than its new parent while having no children to compare
    /// against, so the violation points upward. Whichever direction is not
    /// needed costs at most one extra comparison.
    ///
    /// Returns the key, payload, and number of comparisons.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if `handle` is stale or foreign.
    pub fn remove(&mut self, handle: ItemKey) -> Result<(K, T, u64), HeapError> {
        let removed = self.items.remove(handle).ok_or(HeapError::InvalidHandle)?;
        let pos = removed.pos;
        let last = self.heap.len() - 1;

        let comparisons = if pos == last {
            // Vacating the tail slot (this covers the one-item heap) cannot
            // break the property anywhere.
            self.heap.pop();
            0
        } else {
            self.heap.swap_remove(pos);
            let moved = self.heap[pos];
            self.items[moved].pos = pos;
            let mut comparisons = self.sift_down(pos);
            if self.heap[pos] == moved {
                comparisons += self.sift_up(pos);
            }
            comparisons
        };

        Ok((removed.key, removed.payload, comparisons))
    }

    /// Lowers a live item's key and sifts it up.
    ///
    /// A lowered key can only violate the property against the item's
    /// ancestors, never its descendants, so the upward pass suffices. All key
    /// mutation goes through this entry point; there is deliberately no raw
    /// key setter, which would decouple the mutation from the restoring sift.
    ///
    /// Returns the number of comparisons made.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if `handle` is stale or foreign,
    /// [`HeapError::KeyNotDecreased`] if `new_key` is greater than the current
    /// key (equal is allowed). The key is unchanged on error.
    pub fn decrease_key(&mut self, handle: ItemKey, new_key: K) -> Result<u64, HeapError> {
        let item = self.items.get_mut(handle).ok_or(HeapError::InvalidHandle)?;
        if new_key > item.key {
            return Err(HeapError::KeyNotDecreased);
        }
        item.key = new_key;
        let pos = item.pos;
        Ok(self.sift_up(pos))
    }

    /// Verifies the heap property over the whole tree rooted at slot 0.
    ///
    /// Diagnostic only; mutation never calls this.
    pub fn is_heap(&self) -> bool {
        self.heap.is_empty() || self.is_heap_from(0)
    }

    fn is_heap_from(&self, i: usize) -> bool {
        for j in child_index(i, 1, self.arity)..=child_index(i, self.arity, self.arity) {
            if j >= self.heap.len() {
                break;
            }
            if self.items[self.heap[i]].key > self.items[self.heap[j]].key
                || !self.is_heap_from(j)
            {
                return false;
            }
        }
        true
    }

    /// Verifies that every live item's back-pointer matches its slot and that
    /// the arena holds exactly the live items. Diagnostic only.
    pub fn positions_consistent(&self) -> bool {
        self.items.len() == self.heap.len()
            && self
                .heap
                .iter()
                .enumerate()
                .all(|(i, &handle)| self.items.get(handle).map_or(false, |item| item.pos == i))
    }

    /// Restores the property upward from slot `i`, one comparison per parent
    /// probe. Stops as soon as the parent's key is less than or equal.
    fn sift_up(&mut self, mut i: usize) -> u64 {
        let mut comparisons = 0;
        while i > 0 {
            let parent = parent_index(i, self.arity);
            comparisons += 1;
            if self.items[self.heap[parent]].key <= self.items[self.heap[i]].key {
                break;
            }
            self.swap_slots(i, parent);
            i = parent;
        }
        comparisons
    }

    /// Restores the property downward from slot `i`, one comparison per child
    /// examined. Iterative: the original formulation is a tail call, restated
    /// as a loop so the comparison count is loop-carried.
    fn sift_down(&mut self, mut i: usize) -> u64 {
        let mut comparisons = 0;
        loop {
            let first = child_index(i, 1, self.arity);
            if first >= self.heap.len() {
                break;
            }
            let last = child_index(i, self.arity, self.arity).min(self.heap.len() - 1);
            let mut smallest = i;
            for j in first..=last {
                comparisons += 1;
                if self.items[self.heap[j]].key < self.items[self.heap[smallest]].key {
                    smallest = j;
                }
            }
            if smallest == i {
                break;
            }
            self.swap_slots(i, smallest);
            i = smallest;
        }
        comparisons
    }

    /// Swaps two live slots and rewrites both back-pointers.
    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.items[self.heap[a]].pos = a;
        self.items[self.heap[b]].pos = b;
    }
}
