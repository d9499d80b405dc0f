//! Hit and miss accounting around an [`LruCache`].

use std::{borrow::Borrow, cell::Cell, fmt, future::Future, hash::Hash, rc::Rc, time::Duration};

use crate::lru_cache::LruCache;

/// An [`LruCache`] which counts hits and misses of [`get`][Recorder::get] and
/// [`has`][Recorder::has], every value defined through it and every value
/// disposed of.
///
/// # Examples
///
/// ```
/// use stowage::LruCache;
///
/// let mut cache = LruCache::builder().max_size(2).build_with_recording();
/// cache.set("a", 1);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.get(&"b"), None);
///
/// assert_eq!(cache.get_hit_count(), 1);
/// assert_eq!(cache.get_miss_count(), 1);
/// assert_eq!(cache.get_hit_miss_ratio(), 0.5);
/// ```
pub struct Recorder<K, V> {
    inner: LruCache<K, V>,
    has_hits: u64,
    has_misses: u64,
    get_hits: u64,
    get_misses: u64,
    nr_defined: u64,
    nr_disposed: Rc<Cell<u64>>,
}

/// `hits / (hits + misses)`, or 0 before the first call.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn ratio(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    hits as f64 / total as f64
}

impl<K, V> Recorder<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Start recording `cache`.
    ///
    /// Disposals are counted from here on, through a listener registered on
    /// the cache.
    #[must_use]
    pub fn new(mut cache: LruCache<K, V>) -> Self {
        let nr_disposed = Rc::new(Cell::new(0));
        let counter = Rc::clone(&nr_disposed);
        cache.on_dispose(move |_, _| counter.set(counter.get() + 1));
        Recorder {
            inner: cache,
            has_hits: 0,
            has_misses: 0,
            get_hits: 0,
            get_misses: 0,
            nr_defined: 0,
            nr_disposed,
        }
    }

    /// See [`LruCache::set`]; counts towards [`nr_defined`][Recorder::nr_defined].
    pub fn set(&mut self, key: K, value: V) -> usize {
        self.nr_defined += 1;
        self.inner.set(key, value)
    }

    /// See [`LruCache::get`]; counts a hit or a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.inner.get(key);
        if value.is_some() {
            self.get_hits += 1;
        } else {
            self.get_misses += 1;
        }
        value
    }

    /// See [`LruCache::has`]; counts a hit or a miss.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hit = self.inner.has(key);
        if hit {
            self.has_hits += 1;
        } else {
            self.has_misses += 1;
        }
        hit
    }

    /// See [`LruCache::delete`].
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.delete(key)
    }

    /// See [`LruCache::get_or_create_sync`]; a created value counts towards
    /// [`nr_defined`][Recorder::nr_defined].
    pub fn get_or_create_sync<F>(&mut self, key: K, create: F) -> V
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        let mut created = false;
        let value = self.inner.get_or_create_sync(key, || {
            created = true;
            create()
        });
        if created {
            self.nr_defined += 1;
        }
        value
    }

    /// See [`LruCache::get_or_create`]; a created value counts towards
    /// [`nr_defined`][Recorder::nr_defined].
    pub async fn get_or_create<F, Fut>(&mut self, key: K, create: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
        V: Clone,
    {
        let mut created = false;
        let value = self
            .inner
            .get_or_create(key, || {
                created = true;
                create()
            })
            .await;
        if created {
            self.nr_defined += 1;
        }
        value
    }

    /// See [`LruCache::prune`].
    pub fn prune(&mut self) -> usize {
        self.inner.prune()
    }

    /// See [`LruCache::on_dispose`].
    pub fn on_dispose<F>(&mut self, listener: F)
    where
        F: FnMut(&V, &K) + 'static,
    {
        self.inner.on_dispose(listener);
    }

    /// See [`LruCache::max_size`].
    #[inline]
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.inner.max_size()
    }

    /// See [`LruCache::set_max_size`].
    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.inner.set_max_size(max_size);
    }

    /// See [`LruCache::max_age`].
    #[inline]
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.inner.max_age()
    }

    /// See [`LruCache::set_max_age`].
    pub fn set_max_age(&mut self, max_age: Option<Duration>) {
        self.inner.set_max_age(max_age);
    }

    /// See [`LruCache::len`].
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// See [`LruCache::is_empty`].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// See [`LruCache::size`].
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// Number of [`has`][Recorder::has] calls which found a fresh entry.
    #[inline]
    #[must_use]
    pub fn has_hit_count(&self) -> u64 {
        self.has_hits
    }

    /// Number of [`has`][Recorder::has] calls which found nothing.
    #[inline]
    #[must_use]
    pub fn has_miss_count(&self) -> u64 {
        self.has_misses
    }

    /// Fraction of [`has`][Recorder::has] calls which were hits.
    #[inline]
    #[must_use]
    pub fn has_hit_miss_ratio(&self) -> f64 {
        ratio(self.has_hits, self.has_misses)
    }

    /// Number of [`get`][Recorder::get] calls which found a fresh entry.
    #[inline]
    #[must_use]
    pub fn get_hit_count(&self) -> u64 {
        self.get_hits
    }

    /// Number of [`get`][Recorder::get] calls which found nothing.
    #[inline]
    #[must_use]
    pub fn get_miss_count(&self) -> u64 {
        self.get_misses
    }

    /// Fraction of [`get`][Recorder::get] calls which were hits.
    #[inline]
    #[must_use]
    pub fn get_hit_miss_ratio(&self) -> f64 {
        ratio(self.get_hits, self.get_misses)
    }

    /// Number of values stored through [`set`][Recorder::set] or created by a
    /// `get_or_create` factory.
    #[inline]
    #[must_use]
    pub fn nr_defined(&self) -> u64 {
        self.nr_defined
    }

    /// Number of values which have left the cache for any reason.
    #[inline]
    #[must_use]
    pub fn nr_disposed(&self) -> u64 {
        self.nr_disposed.get()
    }

    /// The wrapped cache, bypassing the counters.
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &LruCache<K, V> {
        &self.inner
    }

    /// Stop recording and return the wrapped cache.
    ///
    /// The disposal counter stays registered on it.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> LruCache<K, V> {
        self.inner
    }
}

impl<K, V> fmt::Debug for Recorder<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("inner", &self.inner)
            .field("has_hits", &self.has_hits)
            .field("has_misses", &self.has_misses)
            .field("get_hits", &self.get_hits)
            .field("get_misses", &self.get_misses)
            .field("nr_defined", &self.nr_defined)
            .field("nr_disposed", &self.nr_disposed.get())
            .finish()
    }
}
