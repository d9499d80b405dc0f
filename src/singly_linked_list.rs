//! A singly-linked stack of boxed nodes.

use std::{fmt, iter, iter::FusedIterator};

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

// ////////////////////////////////////////////////////////////////////////////
// SinglyLinkedList
// ////////////////////////////////////////////////////////////////////////////

/// A singly-linked list which adds and removes values at its front.
///
/// # Examples
///
/// ```
/// use stowage::SinglyLinkedList;
///
/// let mut list: SinglyLinkedList<_> = [2, 3].into_iter().collect();
/// assert_eq!(list.unshift(1), 3);
/// assert_eq!(list.to_vec(), vec![1, 2, 3]);
/// assert_eq!(list.shift(), Some(1));
/// assert_eq!(list.peek(), Some(&2));
/// ```
pub struct SinglyLinkedList<T> {
    head: Link<T>,
    len: usize,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SinglyLinkedList<T> {
    /// Create an empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        SinglyLinkedList { head: None, len: 0 }
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Add a value at the front, returning the new number of values.
    pub fn unshift(&mut self, value: T) -> usize {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
        self.len
    }

    /// Remove and return the value at the front.
    pub fn shift(&mut self) -> Option<T> {
        let node = self.head.take()?;
        let Node { value, next } = *node;
        self.head = next;
        self.len -= 1;
        Some(value)
    }

    /// The value at the front.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Alias of [`SinglyLinkedList::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Iterate from front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            current: self.head.as_deref(),
            remaining: self.len,
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
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
        self.len = 0;
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for SinglyLinkedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyLinkedList<T> {
    fn drop(&mut self) {
        // Unlinking one node at a time keeps long lists from overflowing the
        // stack through recursive `Box` drops.
        self.clear();
    }
}

impl<T: Clone> Clone for SinglyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> iter::FromIterator<T> for SinglyLinkedList<T> {
    /// The first value yielded ends up at the front of the list.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values: Vec<T> = iter.into_iter().collect();
        let mut list = Self::new();
        while let Some(value) = values.pop() {
            list.unshift(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SinglyLinkedList<T> {
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

/// Borrowing iterator over a [`SinglyLinkedList`], front to back.
pub struct Iter<'a, T> {
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::SinglyLinkedList;

    #[test]
    fn empty() {
        let mut list: SinglyLinkedList<u8> = SinglyLinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.shift(), None);
        assert_eq!(list.peek(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn lifo() {
        let mut list = SinglyLinkedList::new();
        for i in 1..=10 {
            assert_eq!(list.unshift(i), i);
        }
        assert_eq!(list.peek_front(), Some(&10));
        assert_eq!(list.to_vec(), (1..=10).rev().collect::<Vec<_>>());
        for i in (1..=10).rev() {
            assert_eq!(list.shift(), Some(i));
        }
        assert_eq!(list.shift(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn from_iter_keeps_order() {
        let list: SinglyLinkedList<_> = ["a", "b", "c"].into_iter().collect();
        assert_eq!(list.len(), 3);
        assert_eq!(list.peek(), Some(&"a"));
        assert_eq!(list.iter().len(), 3);
        assert_eq!((&list).into_iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        let copy = list.clone();
        assert_eq!(copy.to_vec(), list.to_vec());
    }

    #[test]
    fn long_list_drops() {
        let list: SinglyLinkedList<_> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn fmt() {
        let list: SinglyLinkedList<_> = [1, 2, 3].into_iter().collect();
        insta::assert_snapshot!(format!("{list}"), @"[1, 2, 3]");
        insta::assert_snapshot!(format!("{list:?}"), @"[1, 2, 3]");
    }
}
