//! Configuration for [`LruCache`].

use std::{fmt, hash::Hash, time::Duration};

use crate::lru_cache::{LruCache, Recorder, SizeCalculator};

/// Builds an [`LruCache`] or a [`Recorder`].
///
/// Every bound is optional; a cache built with no configuration never evicts
/// and never expires anything.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use stowage::LruCache;
///
/// let cache = LruCache::<String, Vec<u8>>::builder()
///     .max_size(64 * 1024)
///     .max_age(Duration::from_secs(30))
///     .size_calculator(|value, _key| value.len())
///     .build();
/// assert_eq!(cache.max_size(), Some(64 * 1024));
/// ```
pub struct LruCacheBuilder<K, V> {
    max_size: Option<usize>,
    max_age: Option<Duration>,
    size_calculator: Option<SizeCalculator<K, V>>,
}

impl<K, V> LruCacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    /// A builder with no bounds and a size of 1 per entry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        LruCacheBuilder {
            max_size: None,
            max_age: None,
            size_calculator: None,
        }
    }

    /// Evict least recently used entries whenever the total size exceeds
    /// `max_size`.
    #[inline]
    #[must_use]
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Treat entries which were last written or read more than `max_age` ago as
    /// absent.
    #[inline]
    #[must_use]
    pub fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Compute the size of each entry from its value and key, in place of the
    /// default of 1.
    #[inline]
    #[must_use]
    pub fn size_calculator<F>(mut self, size_calculator: F) -> Self
    where
        F: Fn(&V, &K) -> usize + 'static,
    {
        self.size_calculator = Some(Box::new(size_calculator));
        self
    }

    /// Build the cache.
    #[must_use]
    pub fn build(self) -> LruCache<K, V> {
        LruCache::from_parts(self.max_size, self.max_age, self.size_calculator)
    }

    /// Build the cache wrapped in a [`Recorder`] counting hits and misses.
    #[must_use]
    pub fn build_with_recording(self) -> Recorder<K, V> {
        Recorder::new(self.build())
    }
}

impl<K, V> Default for LruCacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LruCacheBuilder<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LruCacheBuilder")
            .field("max_size", &self.max_size)
            .field("max_age", &self.max_age)
            .field("size_calculator", &self.size_calculator.is_some())
            .finish()
    }
}
