//! A double-ended queue stored in a growable ring buffer.

use std::{fmt, iter};

/// Initial number of slots allocated by the first push.
const MIN_CAPACITY: usize = 4;

/// A double-ended queue with `O(1)` amortized pushes and pops at both ends.
///
/// # Examples
///
/// ```
/// use stowage::Deque;
///
/// let mut deque = Deque::new();
/// deque.push("middle");
/// deque.unshift("front");
/// deque.push("back");
///
/// assert_eq!(deque.to_vec(), vec!["front", "middle", "back"]);
/// assert_eq!(deque.shift(), Some("front"));
/// assert_eq!(deque.pop(), Some("back"));
/// ```
#[derive(Clone)]
pub struct Deque<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> Deque<T> {
    /// Create an empty deque.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Deque {
            slots: Vec::new(),
            head: 0,
            len: 0,
        }
    }

    /// Returns the number of values.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }

    /// Double the ring, unrolling it so the front sits at slot 0.
    fn grow(&mut self) {
        let capacity = (self.slots.len() * 2).max(MIN_CAPACITY);
        let mut slots: Vec<Option<T>> = Vec::with_capacity(capacity);
        for offset in 0..self.len {
            let idx = self.slot(offset);
            slots.push(self.slots[idx].take());
        }
        slots.resize_with(capacity, || None);
        self.slots = slots;
        self.head = 0;
    }

    /// Append a value at the back, returning the new number of values.
    pub fn push(&mut self, value: T) -> usize {
        if self.len == self.slots.len() {
            self.grow();
        }
        let idx = self.slot(self.len);
        self.slots[idx] = Some(value);
        self.len += 1;
        self.len
    }

    /// Prepend a value at the front, returning the new number of values.
    pub fn unshift(&mut self, value: T) -> usize {
        if self.len == self.slots.len() {
            self.grow();
        }
        self.head = self.slot(self.slots.len() - 1);
        self.slots[self.head] = Some(value);
        self.len += 1;
        self.len
    }

    /// Remove and return the value at the back.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let idx = self.slot(self.len);
        self.slots[idx].take()
    }

    /// Remove and return the value at the front.
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.slot(1);
        self.len -= 1;
        value
    }

    /// The value at the front.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Alias of [`Deque::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// The value at the back.
    #[inline]
    #[must_use]
    pub fn peek_back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.slot(self.len - 1)].as_ref()
    }

    /// Iterate from front to back.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        (0..self.len).filter_map(move |offset| self.slots[self.slot(offset)].as_ref())
    }

    /// Every value from front to back.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Remove every value, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}

impl<T> Default for Deque<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.push(value);
        }
    }
}

impl<T> iter::FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut deque = Self::new();
        deque.extend(iter);
        deque
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Deque<T> {
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

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::Deque;

    #[test]
    fn empty() {
        let mut deque: Deque<u8> = Deque::new();
        assert_eq!(deque.pop(), None);
        assert_eq!(deque.shift(), None);
        assert_eq!(deque.peek(), None);
        assert_eq!(deque.peek_back(), None);
        assert!(deque.is_empty());
    }

    #[test]
    fn both_ends() {
        let mut deque = Deque::new();
        assert_eq!(deque.push('A'), 1);
        assert_eq!(deque.unshift('B'), 2);
        assert_eq!(deque.push('C'), 3);
        assert_eq!(deque.to_vec(), vec!['B', 'A', 'C']);
        assert_eq!(deque.peek(), Some(&'B'));
        assert_eq!(deque.peek_front(), Some(&'B'));
        assert_eq!(deque.peek_back(), Some(&'C'));
        assert_eq!(deque.pop(), Some('C'));
        assert_eq!(deque.pop(), Some('A'));
        assert_eq!(deque.pop(), Some('B'));
        assert_eq!(deque.pop(), None);
    }

    #[test]
    fn single_value_is_both_front_and_back() {
        let deque: Deque<_> = ["Hello A."].into_iter().collect();
        assert_eq!(deque.peek(), deque.peek_back());
    }

    #[test]
    fn grows_across_the_wrap() {
        let mut deque = Deque::new();
        for i in 0..3 {
            deque.push(i);
        }
        deque.shift();
        deque.shift();
        for i in 3..20 {
            deque.push(i);
            deque.unshift(-i);
        }
        let mut expected: Vec<i32> = (3..20).rev().map(|i| -i).collect();
        expected.extend(2..20);
        assert_eq!(deque.to_vec(), expected);
        assert_eq!(deque.iter().rev().next(), Some(&19));

        deque.clear();
        assert!(deque.is_empty());
        assert_eq!(deque.push(1), 1);
    }

    #[test]
    fn fmt() {
        let deque: Deque<_> = [1, 2].into_iter().collect();
        insta::assert_snapshot!(format!("{deque}"), @"[1, 2]");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(u8),
        Unshift(u8),
        Pop,
        Shift,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::Push),
            any::<u8>().prop_map(Op::Unshift),
            Just(Op::Pop),
            Just(Op::Shift),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_vec_deque(ops in prop::collection::vec(op(), 0..200)) {
            let mut deque = Deque::new();
            let mut reference = VecDeque::new();
            for op in ops {
                match op {
                    Op::Push(v) => {
                        reference.push_back(v);
                        prop_assert_eq!(deque.push(v), reference.len());
                    }
                    Op::Unshift(v) => {
                        reference.push_front(v);
                        prop_assert_eq!(deque.unshift(v), reference.len());
                    }
                    Op::Pop => {
                        prop_assert_eq!(deque.pop(), reference.pop_back());
                    }
                    Op::Shift => {
                        prop_assert_eq!(deque.shift(), reference.pop_front());
                    }
                }
                prop_assert_eq!(deque.peek(), reference.front());
                prop_assert_eq!(deque.peek_back(), reference.back());
            }
            prop_assert_eq!(deque.to_vec(), reference.into_iter().collect::<Vec<_>>());
        }
    }
}
