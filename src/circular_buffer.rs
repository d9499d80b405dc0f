//! A fixed-capacity ring buffer which overwrites its oldest value when full.

use std::{fmt, iter};

use crate::error::{Error, Result};

/// A ring buffer holding at most `capacity` values.
///
/// Pushing onto a full buffer overwrites the oldest value, so the buffer
/// always holds the most recent `capacity` values pushed.
///
/// # Examples
///
/// ```
/// use stowage::CircularBuffer;
///
/// let mut buffer = CircularBuffer::new(3)?;
/// for i in 1..=5 {
///     buffer.push(i);
/// }
/// assert_eq!(buffer.to_vec(), vec![3, 4, 5]);
/// assert_eq!(buffer.shift(), Some(3));
/// assert_eq!(buffer.pop(), Some(5));
/// # Ok::<(), stowage::Error>(())
/// ```
#[derive(Clone)]
pub struct CircularBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> CircularBuffer<T> {
    /// Create an empty buffer holding at most `capacity` values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(CircularBuffer {
            slots: iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            len: 0,
        })
    }

    /// The maximum number of values the buffer holds.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of values in the buffer.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next push will overwrite the oldest value.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }

    /// Append a value, overwriting the oldest one if the buffer is full.
    /// Returns the new number of values.
    pub fn push(&mut self, value: T) -> usize {
        if self.is_full() {
            self.slots[self.head] = Some(value);
            self.head = self.slot(1);
        } else {
            let idx = self.slot(self.len);
            self.slots[idx] = Some(value);
            self.len += 1;
        }
        self.len
    }

    /// Remove and return the newest value.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let idx = self.slot(self.len);
        self.slots[idx].take()
    }

    /// Remove and return the oldest value.
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.slot(1);
        self.len -= 1;
        value
    }

    /// The oldest value.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Alias of [`CircularBuffer::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// The newest value.
    #[inline]
    #[must_use]
    pub fn peek_back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.slot(self.len - 1)].as_ref()
    }

    /// Iterate from the oldest to the newest value.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        (0..self.len).filter_map(move |offset| self.slots[self.slot(offset)].as_ref())
    }

    /// Every value from the oldest to the newest.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> iter::FromIterator<T> for CircularBuffer<T> {
    /// Collect every value into a buffer whose capacity is exactly the number
    /// of values collected; an empty source gives a buffer of capacity 1.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let len = values.len();
        let mut slots: Vec<Option<T>> = values.into_iter().map(Some).collect();
        if slots.is_empty() {
            slots.push(None);
        }
        CircularBuffer {
            slots,
            head: 0,
            len,
        }
    }
}

impl<T> Extend<T> for CircularBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for CircularBuffer<T> {
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
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::CircularBuffer;
    use crate::error::Error;

    #[test]
    fn zero_capacity() {
        assert_eq!(CircularBuffer::<u8>::new(0).err(), Some(Error::ZeroCapacity));
    }

    #[test]
    fn empty() -> Result<()> {
        let mut buffer = CircularBuffer::<u8>::new(2)?;
        assert_eq!(buffer.pop(), None);
        assert_eq!(buffer.shift(), None);
        assert_eq!(buffer.peek(), None);
        assert_eq!(buffer.peek_back(), None);
        assert!(buffer.to_vec().is_empty());
        Ok(())
    }

    #[rstest]
    #[case(1, vec![7])]
    #[case(3, vec![5, 6, 7])]
    #[case(7, vec![1, 2, 3, 4, 5, 6, 7])]
    #[case(10, vec![1, 2, 3, 4, 5, 6, 7])]
    fn overwrites_oldest(#[case] capacity: usize, #[case] expected: Vec<i32>) -> Result<()> {
        let mut buffer = CircularBuffer::new(capacity)?;
        for i in 1..=7 {
            assert_eq!(buffer.push(i), usize::try_from(i)?.min(capacity));
        }
        assert_eq!(buffer.to_vec(), expected);
        assert_eq!(buffer.peek(), expected.first());
        assert_eq!(buffer.peek_front(), expected.first());
        assert_eq!(buffer.peek_back(), expected.last());
        Ok(())
    }

    #[test]
    fn pop_and_shift_wrap() -> Result<()> {
        let mut buffer = CircularBuffer::new(3)?;
        buffer.extend(["a", "b", "c", "d"]);
        assert!(buffer.is_full());
        assert_eq!(buffer.shift(), Some("b"));
        assert_eq!(buffer.pop(), Some("d"));
        buffer.push("e");
        buffer.push("f");
        assert_eq!(buffer.to_vec(), vec!["c", "e", "f"]);
        assert_eq!(buffer.iter().rev().copied().collect::<Vec<_>>(), vec!["f", "e", "c"]);
        assert_eq!(buffer.shift(), Some("c"));
        assert_eq!(buffer.shift(), Some("e"));
        assert_eq!(buffer.shift(), Some("f"));
        assert!(buffer.is_empty());
        Ok(())
    }

    #[test]
    fn from_iter_fits_exactly() {
        let mut buffer: CircularBuffer<_> = ["John Doe", "Jane Doe"].into_iter().collect();
        assert_eq!(buffer.capacity(), 2);
        assert!(buffer.is_full());
        buffer.push("Baby Doe");
        assert_eq!(buffer.to_vec(), vec!["Jane Doe", "Baby Doe"]);

        let empty: CircularBuffer<u8> = std::iter::empty().collect();
        assert_eq!(empty.capacity(), 1);
        assert!(empty.is_empty());
    }

    #[test]
    fn fmt() -> Result<()> {
        let mut buffer = CircularBuffer::new(2)?;
        buffer.extend([1, 2, 3]);
        insta::assert_snapshot!(format!("{buffer}"), @"[2, 3]");
        insta::assert_snapshot!(format!("{buffer:?}"), @"[2, 3]");
        Ok(())
    }
}
