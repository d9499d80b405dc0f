//! A first-in first-out queue.

use std::{fmt, iter};

use crate::deque::Deque;

/// A FIFO queue: values are dequeued in the order they were enqueued.
///
/// # Examples
///
/// ```
/// use stowage::Queue;
///
/// let mut queue: Queue<_> = ["John Doe", "Jane Doe"].into_iter().collect();
/// assert_eq!(queue.enqueue("Baby Doe"), 3);
/// assert_eq!(queue.dequeue(), Some("John Doe"));
/// assert_eq!(queue.to_vec(), vec!["Jane Doe", "Baby Doe"]);
/// ```
#[derive(Clone)]
pub struct Queue<T> {
    values: Deque<T>,
}

impl<T> Queue<T> {
    /// Create an empty queue.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Queue {
            values: Deque::new(),
        }
    }

    /// Returns the number of queued values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is queued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add a value at the back, returning the new number of queued values.
    #[inline]
    pub fn enqueue(&mut self, value: T) -> usize {
        self.values.push(value)
    }

    /// Remove and return the value at the front.
    #[inline]
    pub fn dequeue(&mut self) -> Option<T> {
        self.values.shift()
    }

    /// The value at the front.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.values.peek()
    }

    /// Alias of [`Queue::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Iterate from front to back.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.values.iter()
    }

    /// Every queued value from front to back.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.to_vec()
    }
}

impl<T> Default for Queue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Queue<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        self.values.extend(iterable);
    }
}

impl<T> iter::FromIterator<T> for Queue<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Queue {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.values, f)
    }
}

impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.values, f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Queue;

    #[test]
    fn fifo() {
        let mut queue = Queue::new();
        assert_eq!(queue.dequeue(), None);
        for i in 1..=100 {
            assert_eq!(queue.enqueue(i), i);
        }
        assert_eq!(queue.peek(), Some(&1));
        for i in 1..=50 {
            assert_eq!(queue.dequeue(), Some(i));
        }
        assert_eq!(queue.len(), 50);
        assert_eq!(queue.peek_front(), Some(&51));
        assert_eq!(queue.to_vec(), (51..=100).collect::<Vec<_>>());
    }

    #[test]
    fn fmt() {
        let mut queue: Queue<_> = ['a', 'b', 'c'].into_iter().collect();
        queue.dequeue();
        insta::assert_snapshot!(format!("{queue:?}"), @"['b', 'c']");
        insta::assert_snapshot!(format!("{queue}"), @"[b, c]");
        assert_eq!(queue.iter().next_back(), Some(&'c'));
    }
}
