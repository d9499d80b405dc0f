//! A heap which pops values comparing as equal in the order they were pushed.

use std::{cmp::Ordering, fmt, iter};

use crate::{
    compare::{Ascending, Compare, Descending},
    heap::Heap,
};

/// A value tagged with the position at which it was pushed.
#[derive(Debug, Clone)]
struct Sequenced<T> {
    value: T,
    seq: u64,
}

/// Orders by the wrapped comparator first, then by push order.
#[derive(Debug, Clone, Default)]
struct InsertionOrder<C>(C);

impl<T, C> Compare<Sequenced<T>> for InsertionOrder<C>
where
    C: Compare<T>,
{
    #[inline]
    fn compare(&self, a: &Sequenced<T>, b: &Sequenced<T>) -> Ordering {
        self.0
            .compare(&a.value, &b.value)
            .then_with(|| a.seq.cmp(&b.seq))
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Stable Heap
// ////////////////////////////////////////////////////////////////////////////

/// A [`Heap`] that breaks ties by insertion order, so values comparing as
/// equal are popped first-in first-out.
///
/// Every pushed value is stamped with a 64-bit sequence number which only ever
/// increases. At one push per nanosecond the counter lasts for more than five
/// centuries, so it is never renumbered.
///
/// # Examples
///
/// ```
/// use stowage::StableHeap;
///
/// let mut heap = StableHeap::with_comparator(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
/// heap.push((2, 'A'));
/// heap.push((1, 'Z'));
/// heap.push((2, 'B'));
/// heap.push((2, 'C'));
///
/// assert_eq!(heap.pop(), Some((1, 'Z')));
/// assert_eq!(heap.pop(), Some((2, 'A')));
/// assert_eq!(heap.pop(), Some((2, 'B')));
/// assert_eq!(heap.pop(), Some((2, 'C')));
/// ```
#[derive(Clone)]
pub struct StableHeap<T, C = Ascending> {
    inner: Heap<Sequenced<T>, InsertionOrder<C>>,
    next_seq: u64,
}

/// A stable heap returning the smallest value first.
pub type StableMinHeap<T> = StableHeap<T, Ascending>;

/// A stable heap returning the largest value first.
pub type StableMaxHeap<T> = StableHeap<T, Descending>;

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> StableHeap<T>
where
    T: PartialOrd,
{
    /// Create a new, empty stable min-heap.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }

    /// Create a new, empty stable min-heap; an alias of [`StableHeap::new`].
    #[inline]
    #[must_use]
    pub fn min() -> Self {
        Self::new()
    }
}

impl<T> StableHeap<T, Descending>
where
    T: PartialOrd,
{
    /// Create a new, empty stable max-heap.
    ///
    /// Equal values still come out in the order they went in.
    #[inline]
    #[must_use]
    pub fn max() -> Self {
        Self::with_comparator(Descending)
    }
}

impl<T, C> StableHeap<T, C>
where
    C: Compare<T>,
{
    /// Create a new, empty stable heap ordered by `compare`.
    #[inline]
    pub fn with_comparator(compare: C) -> Self {
        StableHeap {
            inner: Heap::with_comparator(InsertionOrder(compare)),
            next_seq: 0,
        }
    }

    /// Build a stable heap by pushing every value of `iter` in turn.
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
        self.inner.len()
    }

    /// Returns `true` if the heap contains no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Add a value to the heap, returning the new number of values.
    #[inline]
    pub fn push(&mut self, value: T) -> usize {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.inner.push(Sequenced { value, seq })
    }

    /// Remove and return the value at the front of the heap.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.inner.pop().map(|entry| entry.value)
    }

    /// Returns the value at the front of the heap without removing it.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.inner.peek().map(|entry| &entry.value)
    }

    /// Alias of [`StableHeap::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Returns every value in pop order without modifying the heap.
    ///
    /// Like [`Heap::to_vec`], this drains a copy in `O(n log n)`.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
        C: Clone,
    {
        self.clone().into_sorted_vec()
    }

    /// Consume the heap, returning every value in pop order.
    #[inline]
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.inner
            .into_sorted_vec()
            .into_iter()
            .map(|entry| entry.value)
            .collect()
    }

    /// Iterate over the values in internal array order, which is not sorted.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter().map(|entry| &entry.value)
    }

    /// Remove every value from the heap.
    ///
    /// The sequence counter keeps counting.
    #[inline]
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, C> Default for StableHeap<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Extend<T> for StableHeap<T, C>
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

impl<T, C> iter::FromIterator<T> for StableHeap<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}

impl<T, C> fmt::Debug for StableHeap<T, C>
where
    T: fmt::Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(self.inner.iter().map(|entry| &entry.value))
            .finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
