//! Three-way comparators shared by every ordered container.
//!
//! Ordered containers in this crate ([`Heap`][crate::Heap],
//! [`SkipList`][crate::SkipList], ...) are parameterized by a comparator value
//! rather than relying solely on [`Ord`]. Any closure or function of the form
//! `Fn(&T, &T) -> Ordering` is a comparator, as are the two stock unit
//! structs [`Ascending`] and [`Descending`].
//!
//! A comparator **must** be well-behaved. Given some ordering function `f(a,
//! b)`, it must satisfy the following properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value.
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less`, and `f(a,
//!   b) == Equal == f(b, a)`.
//! - Be transitive: if `f(a, b) == Greater` and `f(b, c) == Greater` then
//!   `f(a, c) == Greater`.
//!
//! **Failure to satisfy these properties results in unspecified (though
//! memory-safe) ordering of the container.**

use std::cmp::Ordering;

// ////////////////////////////////////////////////////////////////////////////
// Compare
// ////////////////////////////////////////////////////////////////////////////

/// A three-way comparison between two values of type `T`.
pub trait Compare<T: ?Sized> {
    /// Compare `a` with `b`.
    ///
    /// A result of [`Ordering::Less`] means `a` sorts before `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Sort values in increasing order, so the smallest value is at the front.
///
/// This is the default comparator for every ordered container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Ascending;

impl<T> Compare<T> for Ascending
where
    T: PartialOrd + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        ascending(a, b)
    }
}

/// Sort values in decreasing order, so the largest value is at the front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Descending;

impl<T> Compare<T> for Descending
where
    T: PartialOrd + ?Sized,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        descending(a, b)
    }
}

/// Compare two values in increasing order.
///
/// Values which cannot be ordered relative to one another (such as
/// `f64::NAN`) compare as equal.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use stowage::compare::ascending;
///
/// assert_eq!(ascending(&1, &2), Ordering::Less);
/// assert_eq!(ascending(&f64::NAN, &0.0), Ordering::Equal);
/// ```
#[inline]
pub fn ascending<T>(a: &T, b: &T) -> Ordering
where
    T: PartialOrd + ?Sized,
{
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Compare two values in decreasing order; the negation of [`ascending`].
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use stowage::compare::descending;
///
/// assert_eq!(descending(&1, &2), Ordering::Greater);
/// ```
#[inline]
pub fn descending<T>(a: &T, b: &T) -> Ordering
where
    T: PartialOrd + ?Sized,
{
    ascending(a, b).reverse()
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Ascending, Compare, Descending, ascending, descending};

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn stock_comparators(#[case] a: i32, #[case] b: i32, #[case] expected: Ordering) {
        assert_eq!(ascending(&a, &b), expected);
        assert_eq!(descending(&a, &b), expected.reverse());
        assert_eq!(Ascending.compare(&a, &b), expected);
        assert_eq!(Descending.compare(&a, &b), expected.reverse());
    }

    #[test]
    fn unordered_values_are_equal() {
        assert_eq!(ascending(&f64::NAN, &1.0), Ordering::Equal);
        assert_eq!(descending(&1.0, &f64::NAN), Ordering::Equal);
    }

    #[test]
    fn closures_are_comparators() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(by_len.compare(&"ab", &"c"), Ordering::Greater);
        assert_eq!(Ascending.compare("ab", "c"), Ordering::Less);
    }
}
