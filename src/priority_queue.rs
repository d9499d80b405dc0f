//! A queue-shaped facade over [`Heap`].

use std::{fmt, iter};

use crate::{
    compare::{Ascending, Compare},
    heap::Heap,
};

/// A priority queue: [`dequeue`][PriorityQueue::dequeue] always returns the
/// value which sorts first under the comparator `C`.
///
/// # Examples
///
/// ```
/// use stowage::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// assert_eq!(queue.enqueue("John Doe"), 1);
/// assert_eq!(queue.enqueue("Jane Doe"), 2);
/// assert_eq!(queue.peek(), Some(&"Jane Doe"));
/// assert_eq!(queue.dequeue(), Some("Jane Doe"));
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Clone)]
pub struct PriorityQueue<T, C = Ascending> {
    heap: Heap<T, C>,
}

impl<T> PriorityQueue<T>
where
    T: PartialOrd,
{
    /// Create an empty priority queue serving the smallest value first.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Compare<T>,
{
    /// Create an empty priority queue ordered by `compare`.
    #[inline]
    pub fn with_comparator(compare: C) -> Self {
        PriorityQueue {
            heap: Heap::with_comparator(compare),
        }
    }

    /// Build a priority queue by enqueuing every value of `iter` in turn.
    #[inline]
    pub fn from_iter_with<I>(iter: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        PriorityQueue {
            heap: Heap::from_iter_with(iter, compare),
        }
    }

    /// Returns the number of queued values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Add a value, returning the new number of queued values.
    ///
    /// `O(log n)`.
    #[inline]
    pub fn enqueue(&mut self, value: T) -> usize {
        self.heap.push(value)
    }

    /// Remove and return the value which sorts first.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop()
    }

    /// The value which [`dequeue`][PriorityQueue::dequeue] would return next.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek()
    }

    /// Alias of [`PriorityQueue::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Every queued value in dequeue order, leaving the queue untouched.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
        C: Clone,
    {
        self.heap.to_vec()
    }
}

impl<T, C> Default for PriorityQueue<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Extend<T> for PriorityQueue<T, C>
where
    C: Compare<T>,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.heap.extend(iterable);
    }
}

impl<T, C> iter::FromIterator<T> for PriorityQueue<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}

impl<T, C> fmt::Debug for PriorityQueue<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("heap", &self.heap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::iter;

    use pretty_assertions::assert_eq;

    use super::PriorityQueue;
    use crate::compare::Descending;

    #[test]
    fn dequeue_in_priority_order() {
        let mut queue: PriorityQueue<_> = [5, 1, 4, 2, 3].into_iter().collect();
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.peek_front(), Some(&1));
        assert_eq!(queue.to_vec(), vec![1, 2, 3, 4, 5]);

        let drained: Vec<_> = iter::from_fn(|| queue.dequeue()).collect();
        assert_eq!(drained, vec![1, 2, 3, 4, 5]);
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn custom_order() {
        let mut queue = PriorityQueue::from_iter_with(["b", "c", "a"], Descending);
        assert_eq!(queue.enqueue("d"), 4);
        assert_eq!(queue.dequeue(), Some("d"));
        assert_eq!(queue.to_vec(), vec!["c", "b", "a"]);
    }

    #[test]
    fn debug() {
        let queue: PriorityQueue<u8> = [2, 1].into_iter().collect();
        insta::assert_snapshot!(format!("{queue:?}"), @"PriorityQueue { heap: [1, 2] }");
    }
}
