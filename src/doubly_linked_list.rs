//! A doubly-linked list with constant-time access to both ends.

use std::{fmt, iter};

use crate::sentinel_list::{self, SentinelList};

/// A doubly-linked list supporting pushes and pops at either end.
///
/// The nodes live in a slot arena and are linked by index between two
/// sentinel nodes.
///
/// # Examples
///
/// ```
/// use stowage::DoublyLinkedList;
///
/// let mut list: DoublyLinkedList<_> = ["b"].into_iter().collect();
/// list.unshift("a");
/// list.push("c");
///
/// assert_eq!(list.peek_front(), Some(&"a"));
/// assert_eq!(list.peek_back(), Some(&"c"));
/// assert_eq!(list.pop(), Some("c"));
/// assert_eq!(list.shift(), Some("a"));
/// assert_eq!(list.to_vec(), vec!["b"]);
/// ```
#[derive(Clone)]
pub struct DoublyLinkedList<T> {
    list: SentinelList<T>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> DoublyLinkedList<T> {
    /// Create an empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        DoublyLinkedList {
            list: SentinelList::new(),
        }
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the list holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append a value at the back, returning the new number of values.
    pub fn push(&mut self, value: T) -> usize {
        self.list.push_back(value);
        self.len()
    }

    /// Prepend a value at the front, returning the new number of values.
    pub fn unshift(&mut self, value: T) -> usize {
        self.list.push_front(value);
        self.len()
    }

    /// Remove and return the value at the back.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.list.pop_back()
    }

    /// Remove and return the value at the front.
    #[inline]
    pub fn shift(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    /// The value at the front.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.list.front()
    }

    /// Alias of [`DoublyLinkedList::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// The value at the back. With a single value this is also the front.
    #[inline]
    #[must_use]
    pub fn peek_back(&self) -> Option<&T> {
        self.list.back()
    }

    /// Iterate from front to back. The iterator is double-ended.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Every value from front to back.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Remove every value.
    #[inline]
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Checks the integrity of the list.
    #[cfg(test)]
    fn check(&self) {
        self.list.check();
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for DoublyLinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.list.push_back(value);
        }
    }
}

impl<T> iter::FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// Borrowing iterator over a [`DoublyLinkedList`].
pub struct Iter<'a, T> {
    inner: sentinel_list::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> iter::FusedIterator for Iter<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
