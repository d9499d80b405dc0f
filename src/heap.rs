//! A binary heap backed by a single growable array.
//!
//! The array represents a complete binary tree by implicit index: the parent
//! of index `i` is at `(i - 1) / 2` and its children at `2i + 1` and `2i + 2`.
//! For every non-root index `i`, `compare(data[parent(i)], data[i])` is never
//! [`Greater`][Ordering::Greater], so the root always holds the value which
//! sorts first.
//!
//! ```text
//!            [1]
//!          /     \
//!       [3]       [2]
//!      /   \     /
//!    [7]   [4] [5]          data = [1, 3, 2, 7, 4, 5]
//! ```

use std::{cmp::Ordering, fmt, iter, slice};

use crate::compare::{Ascending, Compare, Descending};

// ////////////////////////////////////////////////////////////////////////////
// Heap
// ////////////////////////////////////////////////////////////////////////////

/// A binary heap ordered by a comparator `C`.
///
/// With the default [`Ascending`] comparator this is a min-heap: [`pop`]
/// returns the smallest value first. Use [`Heap::max`] (or [`MaxHeap`]) for a
/// max-heap, or [`Heap::with_comparator`] for any other ordering.
///
/// The relative order in which values comparing as equal are popped is
/// unspecified; use a [`StableHeap`][crate::StableHeap] if insertion order
/// must be preserved among equals.
///
/// [`pop`]: Heap::pop
#[derive(Clone)]
pub struct Heap<T, C = Ascending> {
    data: Vec<T>,
    compare: C,
}

/// A heap returning the smallest value first.
pub type MinHeap<T> = Heap<T, Ascending>;

/// A heap returning the largest value first.
pub type MaxHeap<T> = Heap<T, Descending>;

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> Heap<T>
where
    T: PartialOrd,
{
    /// Create a new, empty min-heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// let mut heap = Heap::new();
    /// heap.push(4);
    /// heap.push(2);
    /// assert_eq!(heap.peek(), Some(&2));
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }

    /// Create a new, empty min-heap; an alias of [`Heap::new`].
    #[inline]
    #[must_use]
    pub fn min() -> Self {
        Self::new()
    }
}

impl<T> Heap<T, Descending>
where
    T: PartialOrd,
{
    /// Create a new, empty max-heap.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// let mut heap = Heap::max();
    /// heap.push(4);
    /// heap.push(2);
    /// assert_eq!(heap.pop(), Some(4));
    /// ```
    #[inline]
    #[must_use]
    pub fn max() -> Self {
        Self::with_comparator(Descending)
    }
}

impl<T, C> Heap<T, C>
where
    C: Compare<T>,
{
    /// Create a new, empty heap ordered by `compare`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// // Shortest string first.
    /// let mut heap = Heap::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// heap.push("three");
    /// heap.push("to");
    /// assert_eq!(heap.pop(), Some("to"));
    /// ```
    #[inline]
    pub fn with_comparator(compare: C) -> Self {
        Heap {
            data: Vec::new(),
            compare,
        }
    }

    /// Build a heap by pushing every value of `iter` in turn.
    ///
    /// This is `O(n log n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::{Heap, compare::Descending};
    ///
    /// let heap = Heap::from_iter_with(['A', 'C', 'B'], Descending);
    /// assert_eq!(heap.peek(), Some(&'C'));
    /// ```
    #[inline]
    pub fn from_iter_with<I>(iter: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = Self::with_comparator(compare);
        heap.extend(iter);
        heap
    }

    /// Returns the number of values in the heap.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap contains no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Add a value to the heap, returning the new number of values.
    ///
    /// `O(log n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// let mut heap = Heap::new();
    /// assert_eq!(heap.push("John Doe"), 1);
    /// assert_eq!(heap.push("Jane Doe"), 2);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) -> usize {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
        self.data.len()
    }

    /// Remove and return the value at the front of the heap, or `None` if the
    /// heap is empty.
    ///
    /// `O(log n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// let mut heap = Heap::new();
    /// heap.push(4);
    /// heap.push(2);
    /// assert_eq!(heap.pop(), Some(2));
    /// assert_eq!(heap.pop(), Some(4));
    /// assert_eq!(heap.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }
        let root = std::mem::replace(&mut self.data[0], last);
        self.sift_down(0);
        Some(root)
    }

    /// Returns the value at the front of the heap without removing it.
    ///
    /// `O(1)`.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Alias of [`Heap::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Returns every value in the order they would be popped, leaving the heap
    /// untouched.
    ///
    /// This copies the heap and drains the copy, so it is `O(n log n)` rather
    /// than `O(n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::Heap;
    ///
    /// let heap: Heap<_> = ['A', 'C', 'B'].into_iter().collect();
    /// assert_eq!(heap.to_vec(), vec!['A', 'B', 'C']);
    /// assert_eq!(heap.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
        C: Clone,
    {
        self.clone().into_sorted_vec()
    }

    /// Consume the heap, returning every value in the order they would be
    /// popped.
    #[inline]
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(value) = self.pop() {
            sorted.push(value);
        }
        sorted
    }

    /// Iterate over the values in their internal array order, which is **not**
    /// sorted.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Remove every value from the heap.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// A reference to the comparator ordering this heap.
    #[inline]
    pub fn comparator(&self) -> &C {
        &self.compare
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T, C> Heap<T, C>
where
    C: Compare<T>,
{
    /// Move the value at `idx` towards the root while its parent sorts after
    /// it.
    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.compare.compare(&self.data[parent], &self.data[idx]) != Ordering::Greater {
                break;
            }
            self.data.swap(parent, idx);
            idx = parent;
        }
    }

    /// Move the value at `idx` towards the leaves, swapping with the child
    /// that sorts first for as long as that child does not sort after it.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len
                && self.compare.compare(&self.data[left], &self.data[right]) == Ordering::Greater
            {
                right
            } else {
                left
            };
            if self.compare.compare(&self.data[child], &self.data[idx]) == Ordering::Greater {
                break;
            }
            self.data.swap(child, idx);
            idx = child;
        }
    }

    /// Checks the heap ordering invariant.
    #[cfg(test)]
    fn check(&self) {
        for idx in 1..self.data.len() {
            let parent = (idx - 1) / 2;
            assert_ne!(
                self.compare.compare(&self.data[parent], &self.data[idx]),
                Ordering::Greater,
                "heap order violated between {parent} and {idx}"
            );
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, C> Default for Heap<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Extend<T> for Heap<T, C>
where
    C: Compare<T>,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.push(value);
        }
    }
}

impl<T, C> iter::FromIterator<T> for Heap<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}

impl<'a, T, C> IntoIterator for &'a Heap<T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> fmt::Debug for Heap<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.data).finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
