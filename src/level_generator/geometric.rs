//! Geometric level generator.

use rand::prelude::*;

use crate::{
    error::{Error, Result},
    level_generator::{DEFAULT_MAX_HEIGHT, DEFAULT_PROBABILITY, LevelGenerator, MAX_HEIGHT_LIMIT},
};

/// A level generator using a geometric distribution.
///
/// This distribution assumes that if a node is present at some level `$n$`,
/// then the probability that it is present at level `$n+1$` is some constant
/// `$p \in (0, 1)$`. Each promotion is an independent coin flip, and the
/// distribution is truncated at the maximum height allowed.
#[derive(Debug, Clone)]
pub struct Geometric {
    /// The highest level a node may be generated at.
    max_height: usize,
    /// The probability that a node is present in the next level.
    p: f64,
    /// The random number generator.
    rng: SmallRng,
}

impl Geometric {
    /// Create a new geometric level generator producing levels in `[0,
    /// max_height]`, with `p` as the probability that a given node is present
    /// in the next level.
    ///
    /// # Errors
    ///
    /// `p` must be strictly between 0 and 1, and `max_height` must be at most
    /// [`MAX_HEIGHT_LIMIT`].
    #[inline]
    pub fn new(max_height: usize, p: f64) -> Result<Self> {
        Self::with_rng(max_height, p, SmallRng::from_rng(&mut rand::rng()))
    }

    /// Create a new geometric level generator whose random number generator is
    /// seeded with `seed`, so that the sequence of levels is reproducible.
    ///
    /// # Errors
    ///
    /// As for [`Geometric::new`].
    #[inline]
    pub fn with_seed(max_height: usize, p: f64, seed: u64) -> Result<Self> {
        Self::with_rng(max_height, p, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(max_height: usize, p: f64, rng: SmallRng) -> Result<Self> {
        if max_height > MAX_HEIGHT_LIMIT {
            return Err(Error::MaxHeightTooLarge {
                requested: max_height,
                limit: MAX_HEIGHT_LIMIT,
            });
        }
        if !(0.0 < p && p < 1.0) {
            return Err(Error::InvalidProbability);
        }
        Ok(Geometric { max_height, p, rng })
    }

    /// The probability that a node is promoted to the next level.
    #[inline]
    #[must_use]
    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric {
    /// A generator with [`DEFAULT_MAX_HEIGHT`] levels and a promotion
    /// probability of [`DEFAULT_PROBABILITY`], seeded from the thread-local
    /// generator.
    #[inline]
    fn default() -> Self {
        Geometric {
            max_height: DEFAULT_MAX_HEIGHT,
            p: DEFAULT_PROBABILITY,
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl LevelGenerator for Geometric {
    #[inline]
    fn total(&self) -> usize {
        self.max_height + 1
    }

    /// Flip a biased coin until it comes up tails or the maximum height is
    /// reached; the number of heads is the level.
    #[inline]
    fn level(&mut self) -> usize {
        let mut h = 0;
        while h < self.max_height && self.rng.random_bool(self.p) {
            h += 1;
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, bail};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Geometric, LevelGenerator};
    use crate::error::Error;

    #[test]
    fn invalid_max() {
        assert_eq!(
            Geometric::new(65, 0.5).err(),
            Some(Error::MaxHeightTooLarge {
                requested: 65,
                limit: 64
            })
        );
    }

    #[test]
    fn invalid_p() {
        assert_eq!(
            Geometric::new(1, 0.0).err(),
            Some(Error::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, 1.0).err(),
            Some(Error::InvalidProbability)
        );
        assert_eq!(
            Geometric::new(1, f64::NAN).err(),
            Some(Error::InvalidProbability)
        );
    }

    #[test]
    fn zero_height_is_flat() -> Result<()> {
        let mut generator = Geometric::new(0, 0.99)?;
        assert_eq!(generator.total(), 1);
        for _ in 0..1_000 {
            assert_eq!(generator.level(), 0);
        }
        Ok(())
    }

    #[test]
    fn default_levels() {
        let mut generator = Geometric::default();
        assert_eq!(generator.total(), 33);
        assert_eq!(generator.probability(), 0.5);
        assert!(generator.level() <= 32);
    }

    #[test]
    fn seeded_is_reproducible() -> Result<()> {
        let mut a = Geometric::with_seed(16, 0.5, 0x1234_abcd)?;
        let mut b = Geometric::with_seed(16, 0.5, 0x1234_abcd)?;
        for _ in 0..1_000 {
            assert_eq!(a.level(), b.level());
        }
        Ok(())
    }

    #[rstest]
    fn new(#[values(1, 2, 16, 32)] n: usize, #[values(0.1, 0.5, 0.9)] p: f64) -> Result<()> {
        let mut generator = Geometric::new(n, p)?;
        assert_eq!(generator.total(), n + 1);
        for _ in 0..100_000 {
            let level = generator.level();
            assert!((0..=n).contains(&level));
        }

        // Make sure that we can produce at least one level-0 node.
        let mut found = false;
        for _ in 0..1_000_000 {
            if generator.level() == 0 {
                found = true;
                break;
            }
        }
        if !found {
            bail!("Failed to generate a level-0 node.");
        }

        Ok(())
    }

    #[test]
    fn roughly_geometric() -> Result<()> {
        let mut generator = Geometric::with_seed(32, 0.5, 7)?;
        let samples = 100_000;
        let promoted = (0..samples).filter(|_| generator.level() > 0).count();
        // Half of all nodes should be promoted at least once.
        assert!((45_000..55_000).contains(&promoted), "promoted = {promoted}");
        Ok(())
    }
}
