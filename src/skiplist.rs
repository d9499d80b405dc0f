//! An always-ordered skiplist.
//!
//! Each node owns one forward link per level it occupies. Level 0 threads
//! every node in comparator order and each higher level threads a random
//! subset of the level below, so a search can skip over long runs of nodes
//! before dropping down.
//!
//! ```text
//! level 2  head ------------------------> [7] --------------> None
//! level 1  head --------> [3] ----------> [7] ------> [12] -> None
//! level 0  head -> [1] -> [3] -> [5] ---> [7] -> [9] -> [12] -> None
//! ```

use std::{cmp::Ordering, fmt, iter, iter::FusedIterator};

use tracing::trace;

use crate::{
    arena::{Arena, NodeId},
    compare::{Ascending, Compare},
    error::Result,
    level_generator::{Geometric, LevelGenerator},
};

/// A value together with its forward links; `next[level]` is the following
/// node at `level`.
#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Vec<Option<NodeId>>,
}

// ////////////////////////////////////////////////////////////////////////////
// SkipList
// ////////////////////////////////////////////////////////////////////////////

/// The skiplist stores values such that they are always sorted by the
/// comparator `C`, with expected `O(log n)` insertion, search and deletion.
///
/// Duplicates are allowed. A new value is inserted before any values already
/// comparing equal to it.
///
/// Node heights are drawn from the level generator `G`, which defaults to a
/// [`Geometric`] distribution with a maximum height of 32 and a promotion
/// probability of one half. Whatever the generator returns, the list grows by
/// at most one level per insertion.
///
/// # Examples
///
/// ```
/// use stowage::SkipList;
///
/// let mut list = SkipList::new();
/// list.insert('D');
/// list.insert('A');
/// list.insert('C');
/// list.insert('B');
///
/// assert_eq!(list.peek(), Some(&'A'));
/// assert_eq!(list.to_vec(), vec!['A', 'B', 'C', 'D']);
/// assert!(list.delete(&'C'));
/// assert_eq!(list.search(&'C'), None);
/// ```
pub struct SkipList<T, C = Ascending, G = Geometric> {
    nodes: Arena<Node<T>>,
    // Forward links out of the head sentinel, one per level in use.
    head: Vec<Option<NodeId>>,
    len: usize,
    compare: C,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipList<T>
where
    T: PartialOrd,
{
    /// Create a new, empty skiplist in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::SkipList;
    ///
    /// let list: SkipList<i64> = SkipList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(Ascending)
    }
}

impl<T, C> SkipList<T, C>
where
    C: Compare<T>,
{
    /// Create a new, empty skiplist ordered by `compare` with the default
    /// level generator.
    #[inline]
    pub fn with_comparator(compare: C) -> Self {
        Self::with_level_generator(compare, Geometric::default())
    }

    /// Create a new, empty skiplist ordered by `compare`, whose nodes are at
    /// most `max_height` levels above the base level and are promoted to each
    /// next level with probability `promoting_probability`.
    ///
    /// # Errors
    ///
    /// `promoting_probability` must be strictly between 0 and 1, and
    /// `max_height` must be at most
    /// [`MAX_HEIGHT_LIMIT`][crate::level_generator::MAX_HEIGHT_LIMIT].
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::{SkipList, compare::Descending};
    ///
    /// let mut list = SkipList::with_config(Descending, 16, 0.25)?;
    /// list.extend([1, 3, 2]);
    /// assert_eq!(list.to_vec(), vec![3, 2, 1]);
    ///
    /// assert!(SkipList::<u8, _>::with_config(Descending, 16, 1.5).is_err());
    /// # Ok::<(), stowage::Error>(())
    /// ```
    #[inline]
    pub fn with_config(compare: C, max_height: usize, promoting_probability: f64) -> Result<Self> {
        Ok(Self::with_level_generator(
            compare,
            Geometric::new(max_height, promoting_probability)?,
        ))
    }

    /// Build a skiplist by inserting every value of `iter` in turn.
    #[inline]
    pub fn from_iter_with<I>(iter: I, compare: C) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut list = Self::with_comparator(compare);
        list.extend(iter);
        list
    }
}

impl<T, C, G> SkipList<T, C, G>
where
    C: Compare<T>,
    G: LevelGenerator,
{
    /// Create a new, empty skiplist ordered by `compare` which draws node
    /// heights from `level_generator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::{SkipList, compare::Ascending, level_generator::Geometric};
    ///
    /// let generator = Geometric::with_seed(8, 0.5, 42)?;
    /// let mut list = SkipList::with_level_generator(Ascending, generator);
    /// list.extend(0..100);
    /// assert!(list.height() <= 8);
    /// # Ok::<(), stowage::Error>(())
    /// ```
    #[inline]
    pub fn with_level_generator(compare: C, level_generator: G) -> Self {
        SkipList {
            nodes: Arena::new(),
            head: vec![None],
            len: 0,
            compare,
            level_generator,
        }
    }

    /// Returns the number of values in the skiplist.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The index of the highest level currently in use; an empty list has
    /// height 0.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.head.len() - 1
    }

    /// Insert a value, returning the new number of values.
    ///
    /// Expected `O(log n)`, worst case `O(n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::SkipList;
    ///
    /// let mut list = SkipList::new();
    /// assert_eq!(list.insert("Jane Doe"), 1);
    /// assert_eq!(list.insert("Jane Doe"), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> usize {
        let mut update = self.predecessors(&value);

        let height = self.level_generator.level().min(self.head.len());
        if height == self.head.len() {
            self.head.push(None);
            update.push(None);
            trace!(height, "skiplist grew a level");
        }

        let next = (0..=height)
            .map(|level| self.next_of(update[level], level))
            .collect();
        let id = self.nodes.insert(Node { value, next });
        for (level, prev) in update.into_iter().enumerate().take(height + 1) {
            self.set_next(prev, level, Some(id));
        }

        self.len += 1;
        self.len
    }

    /// Find a value comparing equal to `value`.
    ///
    /// Average `O(log n)`, worst case `O(n)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::SkipList;
    ///
    /// let list: SkipList<_> = ["John Doe", "Jane Doe"].into_iter().collect();
    /// assert_eq!(list.search(&"Jane Doe"), Some(&"Jane Doe"));
    /// assert_eq!(list.search(&"Baby Doe"), None);
    /// ```
    #[must_use]
    pub fn search(&self, value: &T) -> Option<&T> {
        let mut prev = None;
        for level in (0..self.head.len()).rev() {
            while let Some(id) = self.next_of(prev, level) {
                let candidate = &self.nodes[id].value;
                match self.compare.compare(value, candidate) {
                    Ordering::Greater => prev = Some(id),
                    Ordering::Equal => return Some(candidate),
                    Ordering::Less => break,
                }
            }
        }
        None
    }

    /// Returns `true` if a value comparing equal to `value` is present.
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Remove one value comparing equal to `value`, returning whether anything
    /// was removed.
    ///
    /// If several values compare equal, the one found first in order is
    /// removed. Levels left empty by the removal are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::SkipList;
    ///
    /// let mut list: SkipList<_> = ["Jane Doe", "John Doe"].into_iter().collect();
    /// assert!(list.delete(&"John Doe"));
    /// assert!(!list.delete(&"John Doe"));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn delete(&mut self, value: &T) -> bool {
        let update = self.predecessors(value);
        let Some(id) = self.next_of(update[0], 0) else {
            return false;
        };
        if self.compare.compare(value, &self.nodes[id].value) != Ordering::Equal {
            return false;
        }

        let Some(node) = self.nodes.remove(id) else {
            return false;
        };
        for (level, next) in node.next.into_iter().enumerate() {
            if self.next_of(update[level], level) == Some(id) {
                self.set_next(update[level], level, next);
            }
        }
        while self.head.len() > 1 && self.head.last() == Some(&None) {
            self.head.pop();
        }

        self.len -= 1;
        true
    }

    /// The first value in order.
    ///
    /// `O(1)`.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.head[0].map(|id| &self.nodes[id].value)
    }

    /// Alias of [`SkipList::peek`].
    #[inline]
    #[must_use]
    pub fn peek_front(&self) -> Option<&T> {
        self.peek()
    }

    /// Every value in order.
    ///
    /// `O(n)`.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Iterate over the values in order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            current: self.head[0],
            remaining: self.len,
        }
    }

    /// Remove every value.
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = vec![None];
        self.len = 0;
    }

    /// For every level in use, the last node (`None` for the head) whose value
    /// sorts strictly before `value`.
    fn predecessors(&self, value: &T) -> Vec<Option<NodeId>> {
        let mut update = vec![None; self.head.len()];
        let mut prev = None;
        for level in (0..self.head.len()).rev() {
            while let Some(id) = self.next_of(prev, level) {
                if self.compare.compare(value, &self.nodes[id].value) != Ordering::Greater {
                    break;
                }
                prev = Some(id);
            }
            update[level] = prev;
        }
        update
    }

    fn next_of(&self, prev: Option<NodeId>, level: usize) -> Option<NodeId> {
        match prev {
            None => self.head[level],
            Some(id) => self.nodes[id].next[level],
        }
    }

    fn set_next(&mut self, prev: Option<NodeId>, level: usize, next: Option<NodeId>) {
        match prev {
            None => self.head[level] = next,
            Some(id) => self.nodes[id].next[level] = next,
        }
    }

    /// Checks the integrity of the skiplist.
    #[cfg(test)]
    fn check(&self) {
        let mut below: Vec<NodeId> = Vec::new();
        for level in 0..self.head.len() {
            let mut chain = Vec::new();
            let mut current = self.head[level];
            while let Some(id) = current {
                assert!(self.nodes[id].next.len() > level, "node linked above its height");
                chain.push(id);
                current = self.nodes[id].next[level];
            }
            for pair in chain.windows(2) {
                assert_ne!(
                    self.compare
                        .compare(&self.nodes[pair[0]].value, &self.nodes[pair[1]].value),
                    Ordering::Greater,
                    "level {level} out of order"
                );
            }
            if level == 0 {
                assert_eq!(chain.len(), self.len, "length mismatch");
            } else {
                assert!(
                    chain.iter().all(|id| below.contains(id)),
                    "level {level} is not a subset of the level below"
                );
            }
            below = chain;
        }
        if self.head.len() > 1 {
            assert!(self.head[self.head.len() - 1].is_some(), "empty top level");
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T, C> Default for SkipList<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C, G> Extend<T> for SkipList<T, C, G>
where
    C: Compare<T>,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterable: I) {
        for value in iterable {
            self.insert(value);
        }
    }
}

impl<T, C> iter::FromIterator<T> for SkipList<T, C>
where
    C: Compare<T> + Default,
{
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with(iter, C::default())
    }
}

impl<'a, T, C, G> IntoIterator for &'a SkipList<T, C, G>
where
    C: Compare<T>,
    G: LevelGenerator,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C, G> fmt::Debug for SkipList<T, C, G>
where
    T: fmt::Debug,
    C: Compare<T>,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, G> fmt::Display for SkipList<T, C, G>
where
    T: fmt::Display,
    C: Compare<T>,
    G: LevelGenerator,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "]")
    }
}

// ///////////////////////////////////////////////
// Iterators
// ///////////////////////////////////////////////

/// An iterator over the values of a [`SkipList`], in order.
pub struct Iter<'a, T> {
    nodes: &'a Arena<Node<T>>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let nodes = self.nodes;
        let node = &nodes[self.current?];
        self.current = node.next[0];
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
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
    use rstest::rstest;

    use super::SkipList;
    use crate::{
        compare::{Ascending, Descending},
        level_generator::{Geometric, LevelGenerator},
    };

    /// Promotes every node as high as it is allowed to go.
    struct Tallest;

    impl LevelGenerator for Tallest {
        fn total(&self) -> usize {
            usize::MAX
        }

        fn level(&mut self) -> usize {
            usize::MAX - 1
        }
    }

    #[test]
    fn basic_small() {
        let mut sl: SkipList<i64> = SkipList::new();
        sl.check();
        assert!(!sl.delete(&1));
        sl.check();
        assert_eq!(sl.insert(1), 1);
        sl.check();
        assert!(sl.delete(&1));
        sl.check();
        sl.insert(1);
        sl.insert(2);
        sl.check();
        assert!(sl.delete(&1));
        sl.check();
        assert!(sl.delete(&2));
        sl.check();
        assert!(!sl.delete(&1));
        assert!(sl.is_empty());
        assert_eq!(sl.height(), 0);
    }

    #[rstest]
    fn basic_large(#[values(1, 10, 1_000)] size: usize) -> Result<()> {
        let mut sl = SkipList::with_config(Ascending, 16, 0.5)?;
        for i in 0..size {
            assert_eq!(sl.insert(i), i + 1);
        }
        sl.check();
        assert_eq!(sl.peek(), Some(&0));

        for i in 0..size {
            assert!(sl.delete(&i));
            assert_eq!(sl.len(), size - i - 1);
        }
        sl.check();
        assert_eq!(sl.peek(), None);
        Ok(())
    }

    #[test]
    fn grows_one_level_at_a_time() {
        let mut sl = SkipList::with_level_generator(Ascending, Tallest);
        for i in 0..5 {
            sl.insert(i);
            sl.check();
            assert_eq!(sl.height(), i + 1);
        }
    }

    #[test]
    fn flat_list() -> Result<()> {
        let mut sl = SkipList::with_level_generator(Descending, Geometric::with_seed(0, 0.5, 1)?);
        sl.extend([4, 8, 1, 9]);
        sl.check();
        assert_eq!(sl.height(), 0);
        assert_eq!(sl.to_vec(), vec![9, 8, 4, 1]);
        Ok(())
    }

    #[test]
    fn shrinks_after_delete() {
        let mut sl = SkipList::with_level_generator(Ascending, Tallest);
        sl.extend([1, 2, 3]);
        assert_eq!(sl.height(), 3);
        assert!(sl.delete(&3));
        sl.check();
        assert_eq!(sl.height(), 2);
    }

    #[test]
    fn duplicates() {
        let mut sl = SkipList::with_comparator(|a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0));
        sl.insert((1, 'a'));
        sl.insert((2, 'x'));
        sl.insert((1, 'b'));
        sl.check();
        // The newest of equal values sits in front.
        assert_eq!(sl.to_vec(), vec![(1, 'b'), (1, 'a'), (2, 'x')]);
        assert!(sl.delete(&(1, '?')));
        assert_eq!(sl.to_vec(), vec![(1, 'a'), (2, 'x')]);
        sl.check();
    }

    #[test]
    fn search_and_contains() {
        let sl: SkipList<_> = (0..100).map(|i| i * 2).collect();
        for i in 0..100 {
            assert_eq!(sl.search(&(i * 2)), Some(&(i * 2)));
            assert!(!sl.contains(&(i * 2 + 1)));
        }
        assert_eq!(sl.search(&-1), None);
    }

    #[test]
    fn iter() {
        let size = 10_000;
        let sl: SkipList<_> = (0..size).rev().collect();
        let mut iter = sl.iter();
        for i in 0..size {
            assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
            assert_eq!(iter.next(), Some(&i));
        }
        assert_eq!(iter.size_hint(), (0, Some(0)));
        assert!(iter.next().is_none());
        assert_eq!((&sl).into_iter().count(), size);
    }

    #[test]
    fn clear() {
        let mut sl: SkipList<_> = (0..100).collect();
        sl.clear();
        sl.check();
        assert!(sl.is_empty());
        assert_eq!(sl.height(), 0);
        sl.insert(3);
        assert_eq!(sl.to_vec(), vec![3]);
    }

    #[test]
    fn fmt() {
        let sl: SkipList<_> = ["b", "a", "c"].into_iter().collect();
        insta::assert_snapshot!(format!("{sl}"), @"[a, b, c]");
        insta::assert_snapshot!(format!("{sl:?}"), @r#"["a", "b", "c"]"#);
    }

    #[test]
    fn random_permutation() {
        let mut values: Vec<u32> = (0..2_000).collect();
        values.shuffle(&mut StdRng::seed_from_u64(0x1234_abcd));

        let mut sl = SkipList::from_iter_with(values.iter().copied(), |a: &u32, b: &u32| a.cmp(b));
        sl.check();
        assert_eq!(sl.to_vec(), (0..2_000).collect::<Vec<_>>());

        for v in values.iter().step_by(3) {
            let before = sl.len();
            assert!(sl.delete(v));
            assert_eq!(sl.search(v), None);
            assert_eq!(sl.len(), before - 1);
        }
        sl.check();
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            values in prop::collection::hash_set(any::<i32>(), 0..200),
            absent in any::<i32>(),
        ) {
            let values: Vec<_> = values.into_iter().collect();
            let mut sl: SkipList<i32> = values.iter().copied().collect();
            sl.check();

            let mut expected = values.clone();
            expected.sort_unstable();
            prop_assert_eq!(sl.to_vec(), expected);

            for v in &values {
                prop_assert_eq!(sl.search(v), Some(v));
            }

            if !values.contains(&absent) {
                prop_assert_eq!(sl.search(&absent), None);
                prop_assert!(!sl.delete(&absent));
                prop_assert_eq!(sl.len(), values.len());
            }

            for v in &values {
                prop_assert!(sl.delete(v));
                prop_assert_eq!(sl.search(v), None);
            }
            prop_assert!(sl.is_empty());
            sl.check();
        }

        #[test]
        fn prop_descending(values in prop::collection::vec(any::<i16>(), 0..200)) {
            let sl = SkipList::from_iter_with(values.iter().copied(), Descending);
            let mut expected = values;
            expected.sort_unstable_by(|a, b| b.cmp(a));
            prop_assert_eq!(sl.to_vec(), expected);
            prop_assert_eq!(sl.peek().copied(), sl.iter().next().copied());
        }
    }

    #[test]
    fn floats_with_nan_do_not_panic() {
        let mut sl = SkipList::new();
        sl.extend([1.0, f64::NAN, 0.5]);
        assert_eq!(sl.len(), 3);
        assert!(sl.iter().any(|v: &f64| v.is_nan()));
    }
}
