//=========================================================================
// Fixed Size Array
//=========================================================================
//
// Pre-allocated, index-addressable ordered sequence.
//
// Storage is reserved once at construction and never grows: `push` past
// capacity fails, `clear` keeps the allocation. Every per-frame list in
// the simulation is one of these.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

//=== Internal Dependencies ===============================================

use super::sort::Sorter;
use crate::core::error::CapacityError;

//=== FixedSizeArray ======================================================

/// Ordered sequence with a hard capacity ceiling.
///
/// Invariant: `len() <= capacity()` at all times; the backing buffer is
/// never reallocated after construction.
pub struct FixedSizeArray<T> {
    items: Vec<T>,
    capacity: usize,
    name: &'static str,
}

impl<T> FixedSizeArray<T> {
    //--- Construction -----------------------------------------------------

    /// Allocates storage for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        Self::named("FixedSizeArray", capacity)
    }

    /// Like [`new`](Self::new), with a name used in capacity errors.
    pub fn named(name: &'static str, capacity: usize) -> Self {
        assert!(capacity > 0, "{} capacity must be positive", name);
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            name,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Appends an element, failing instead of growing when full.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        if self.items.len() >= self.capacity {
            return Err(self.exhausted());
        }
        self.items.push(item);
        Ok(())
    }

    /// Inserts at `index`, shifting later elements up.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), CapacityError> {
        if self.items.len() >= self.capacity {
            return Err(self.exhausted());
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    /// Removes the element at `index` by moving the last element into its slot.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.items.swap_remove(index)
    }

    /// Keeps only elements matching `keep`, preserving order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }

    /// Drops every element; storage is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes every element in order, keeping the storage.
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }

    /// Orders the elements in place with the given strategy.
    pub fn sort_by<S, F>(&mut self, sorter: &S, compare: F)
    where
        S: Sorter,
        F: FnMut(&T, &T) -> Ordering,
    {
        let count = self.items.len();
        sorter.sort_by(&mut self.items, count, compare);
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    //--- Internal Helpers -------------------------------------------------

    fn exhausted(&self) -> CapacityError {
        CapacityError {
            container: self.name,
            capacity: self.capacity,
        }
    }
}

impl<T: PartialEq> FixedSizeArray<T> {
    /// Index of the first element equal to `item`.
    pub fn find(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }
}

//--- Trait Implementations -----------------------------------------------

impl<T> Index<usize> for FixedSizeArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for FixedSizeArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a FixedSizeArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for FixedSizeArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedSizeArray")
            .field("name", &self.name)
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .field("items", &self.items)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collections::sort::{QuickSorter, StandardSorter};

    #[test]
    fn push_until_full_then_fails() {
        let mut array = FixedSizeArray::new(3);
        assert!(array.push(1).is_ok());
        assert!(array.push(2).is_ok());
        assert!(array.push(3).is_ok());
        assert!(array.is_full());

        let err = array.push(4).unwrap_err();
        assert_eq!(err.capacity, 3);
        assert_eq!(array.len(), 3, "Failed push must not change the contents");
    }

    #[test]
    fn named_array_reports_its_name() {
        let mut array = FixedSizeArray::named("render queue", 1);
        array.push('a').unwrap();
        let err = array.push('b').unwrap_err();
        assert_eq!(err.container, "render queue");
        assert_eq!(err.to_string(), "render queue exhausted (capacity 1)");
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _array: FixedSizeArray<u8> = FixedSizeArray::new(0);
    }

    #[test]
    fn clear_keeps_storage() {
        let mut array = FixedSizeArray::new(64);
        for i in 0..64 {
            array.push(i).unwrap();
        }
        let ptr_before = array.as_slice().as_ptr();

        array.clear();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 64);

        for i in 0..64 {
            array.push(i).unwrap();
        }
        assert_eq!(array.as_slice().as_ptr(), ptr_before, "Storage must not be reallocated");
    }

    #[test]
    fn indexing_and_find() {
        let mut array = FixedSizeArray::new(4);
        array.push(10).unwrap();
        array.push(20).unwrap();
        array[1] = 25;

        assert_eq!(array[0], 10);
        assert_eq!(array.find(&25), Some(1));
        assert_eq!(array.find(&20), None);
    }

    #[test]
    fn insert_respects_capacity() {
        let mut array = FixedSizeArray::new(3);
        array.push(1).unwrap();
        array.push(3).unwrap();
        array.insert(1, 2).unwrap();
        assert_eq!(array.as_slice(), &[1, 2, 3]);
        assert!(array.insert(0, 0).is_err());
    }

    #[test]
    fn swap_remove_moves_last_into_slot() {
        let mut array = FixedSizeArray::new(4);
        for v in [1, 2, 3, 4] {
            array.push(v).unwrap();
        }
        assert_eq!(array.swap_remove(0), 1);
        assert_eq!(array.as_slice(), &[4, 2, 3]);
    }

    #[test]
    fn sort_with_either_strategy() {
        let mut a = FixedSizeArray::new(8);
        let mut b = FixedSizeArray::new(8);
        for v in [5, 3, 9, 3, 1, 7] {
            a.push(v).unwrap();
            b.push(v).unwrap();
        }

        a.sort_by(&StandardSorter, |x, y| x.cmp(y));
        b.sort_by(&QuickSorter, |x, y| x.cmp(y));

        assert_eq!(a.as_slice(), &[1, 3, 3, 5, 7, 9]);
        assert_eq!(a.as_slice(), b.as_slice());
    }
}
