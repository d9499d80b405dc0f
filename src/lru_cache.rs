//! A least-recently-used cache with optional size and age bounds.
//!
//! Entries live in a [`SentinelList`] ordered by recency (most recently used
//! at the front) and a hash map points each key at its list node:
//!
//! ```text
//!   map:  "a" -> #3   "b" -> #1   "c" -> #2
//!
//!   <head> <--> [#2 c] <--> [#3 a] <--> [#1 b] <--> <tail>
//!               newest                   oldest
//! ```
//!
//! Every entry carries a computed size (1 by default) and the time it was
//! last written or read. When the total size exceeds the maximum size, entries
//! are evicted from the tail; when an entry is older than the maximum age it
//! is treated as absent and destroyed the next time it is looked up.
//!
//! Whenever an entry leaves the cache, whether evicted, expired, deleted or
//! overwritten, every listener registered with [`LruCache::on_dispose`] is
//! called with the departing value and its key.

pub mod builder;
pub mod recorder;

use std::{
    borrow::Borrow,
    fmt,
    future::Future,
    hash::Hash,
    mem,
    time::{Duration, Instant},
};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

pub use self::{builder::LruCacheBuilder, recorder::Recorder};
use crate::{arena::NodeId, sentinel_list::SentinelList};

/// Computes the size an entry counts for against the maximum size.
pub type SizeCalculator<K, V> = Box<dyn Fn(&V, &K) -> usize>;

/// Called with the value and key of every entry leaving the cache.
pub type DisposeListener<K, V> = Box<dyn FnMut(&V, &K)>;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    updated_at: Instant,
    size: usize,
}

// ////////////////////////////////////////////////////////////////////////////
// LruCache
// ////////////////////////////////////////////////////////////////////////////

/// A least-recently-used cache.
///
/// By default a cache is unbounded: nothing is evicted and nothing expires.
/// Use [`LruCache::builder`] to bound it by size or age.
///
/// # Examples
///
/// ```
/// use stowage::LruCache;
///
/// let mut cache = LruCache::builder().max_size(2).build();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // "b" is now the least recently used entry.
/// cache.set("c", 3);
/// assert!(!cache.has(&"b"));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V> {
    map: FxHashMap<K, NodeId>,
    list: SentinelList<Entry<K, V>>,
    size: usize,
    max_size: Option<usize>,
    max_age: Option<Duration>,
    // `None` counts every entry as 1.
    size_calculator: Option<SizeCalculator<K, V>>,
    listeners: Vec<DisposeListener<K, V>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create an unbounded cache in which every entry has size 1.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a cache.
    #[inline]
    #[must_use]
    pub fn builder() -> LruCacheBuilder<K, V> {
        LruCacheBuilder::new()
    }

    pub(crate) fn from_parts(
        max_size: Option<usize>,
        max_age: Option<Duration>,
        size_calculator: Option<SizeCalculator<K, V>>,
    ) -> Self {
        LruCache {
            map: FxHashMap::default(),
            list: SentinelList::new(),
            size: 0,
            max_size,
            max_age,
            size_calculator,
            listeners: Vec::new(),
        }
    }

    /// Returns the number of entries, stale ones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The sum of the computed sizes of every entry.
    ///
    /// With the default size calculator this equals [`LruCache::len`].
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The total size above which entries are evicted, if any.
    #[inline]
    #[must_use]
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Change the maximum size, evicting least recently used entries straight
    /// away if the cache no longer fits.
    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        debug!(?max_size, "lru cache max size changed");
        self.max_size = max_size;
        self.trim();
    }

    /// The age after which an entry is considered stale, if any.
    #[inline]
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Change the maximum age, then [`prune`][LruCache::prune] every entry
    /// which is now stale.
    pub fn set_max_age(&mut self, max_age: Option<Duration>) {
        debug!(?max_age, "lru cache max age changed");
        self.max_age = max_age;
        self.prune();
    }

    /// Register a listener called with `(value, key)` whenever an entry leaves
    /// the cache.
    ///
    /// Listeners run synchronously, in registration order, before the
    /// operation which removed the entry returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    ///
    /// use stowage::LruCache;
    ///
    /// let disposed = Rc::new(RefCell::new(Vec::new()));
    /// let mut cache = LruCache::builder().max_size(1).build();
    /// let sink = Rc::clone(&disposed);
    /// cache.on_dispose(move |value: &u8, key: &char| sink.borrow_mut().push((*key, *value)));
    ///
    /// cache.set('a', 1);
    /// cache.set('b', 2);
    /// assert_eq!(*disposed.borrow(), vec![('a', 1)]);
    /// ```
    pub fn on_dispose<F>(&mut self, listener: F)
    where
        F: FnMut(&V, &K) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Insert or overwrite an entry, returning the new total size.
    ///
    /// Overwriting disposes of the previous value. The entry becomes the most
    /// recently used, then least recently used entries are evicted until the
    /// total size fits. An entry which alone is larger than the maximum size
    /// is therefore evicted straight away.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::LruCache;
    ///
    /// let mut cache = LruCache::builder()
    ///     .size_calculator(|value: &String, _key: &u32| value.len())
    ///     .build();
    /// assert_eq!(cache.set(1, "four".to_owned()), 4);
    /// assert_eq!(cache.set(2, "sixsix".to_owned()), 10);
    /// assert_eq!(cache.set(1, "x".to_owned()), 7);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> usize {
        let now = Instant::now();
        let size = self
            .size_calculator
            .as_ref()
            .map_or(1, |size_calculator| size_calculator(&value, &key));

        match self.map.get(&key).copied() {
            Some(id) => self.overwrite(id, key, value, size, now),
            None => {
                let id = self.list.push_front(Entry {
                    key: key.clone(),
                    value,
                    updated_at: now,
                    size,
                });
                self.map.insert(key, id);
                self.size += size;
            }
        }

        self.trim();
        self.size
    }

    /// Look up an entry, making it the most recently used and refreshing its
    /// age.
    ///
    /// A stale entry is destroyed and reported as absent.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.live_id(key)?;
        self.list.move_to_front(id);
        let entry = self.list.get_mut(id)?;
        entry.updated_at = Instant::now();
        Some(&entry.value)
    }

    /// Returns `true` if a fresh entry exists for `key`, without changing its
    /// recency.
    ///
    /// A stale entry is destroyed and reported as absent.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.live_id(key).is_some()
    }

    /// Remove an entry, disposing of it. Returns whether anything was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.map.get(key).copied() {
            Some(id) => self.destroy(id),
            None => false,
        }
    }

    /// Return the value for `key`, calling `create` and storing its result if
    /// there is no fresh entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::LruCache;
    ///
    /// let mut cache = LruCache::new();
    /// assert_eq!(cache.get_or_create_sync("answer", || 42), 42);
    /// assert_eq!(cache.get_or_create_sync("answer", || unreachable!()), 42);
    /// ```
    pub fn get_or_create_sync<F>(&mut self, key: K, create: F) -> V
    where
        F: FnOnce() -> V,
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value.clone();
        }
        let value = create();
        self.set(key, value.clone());
        value
    }

    /// Return the value for `key`, awaiting `create` and storing its result if
    /// there is no fresh entry.
    ///
    /// The cache stays mutably borrowed while `create` runs, so two calls on
    /// the same cache can never interleave. Callers who share a cache through
    /// a `RefCell` and release the borrow themselves must expect the factory
    /// to run once per concurrent miss, with the last write winning and
    /// disposing of the earlier values.
    ///
    /// # Examples
    ///
    /// ```
    /// use stowage::LruCache;
    ///
    /// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
    /// let mut cache = LruCache::new();
    /// let value = cache.get_or_create("user:1", || async { "Jane Doe" }).await;
    /// assert_eq!(value, "Jane Doe");
    /// assert!(cache.has(&"user:1"));
    /// # });
    /// ```
    pub async fn get_or_create<F, Fut>(&mut self, key: K, create: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return value.clone();
        }
        let value = create().await;
        self.set(key, value.clone());
        value
    }

    /// Like [`get_or_create`][LruCache::get_or_create] for a fallible factory.
    ///
    /// # Errors
    ///
    /// Returns the factory's error, in which case nothing is written and no
    /// listener is called.
    pub async fn try_get_or_create<F, Fut, E>(&mut self, key: K, create: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value.clone());
        }
        let value = create().await?;
        self.set(key, value.clone());
        Ok(value)
    }

    /// Destroy every stale entry in a single pass, returning how many were
    /// removed.
    ///
    /// `O(n)`.
    pub fn prune(&mut self) -> usize {
        if self.max_age.is_none() {
            return 0;
        }
        let now = Instant::now();
        let mut removed = 0;
        let mut cursor = self.list.front_id();
        while let Some(id) = cursor {
            cursor = self.list.next_id(id);
            let stale = self.list.get(id).is_some_and(|entry| self.is_stale(entry, now));
            if stale && self.destroy(id) {
                removed += 1;
            }
        }
        debug!(removed, remaining = self.len(), "pruned stale lru cache entries");
        removed
    }

    /// Remove every entry, disposing of each from least to most recently used.
    pub fn clear(&mut self) {
        while let Some(id) = self.list.back_id() {
            self.destroy(id);
        }
    }

    /// The keys from most to least recently used, stale entries included.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    /// The node for `key` if it exists and is fresh; a stale node is destroyed.
    fn live_id<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.map.get(key).copied()?;
        let stale = self
            .list
            .get(id)
            .is_some_and(|entry| self.is_stale(entry, Instant::now()));
        if stale {
            trace!("destroying stale lru cache entry");
            self.destroy(id);
            return None;
        }
        Some(id)
    }

    fn is_stale(&self, entry: &Entry<K, V>, now: Instant) -> bool {
        self.max_age
            .is_some_and(|max_age| now.saturating_duration_since(entry.updated_at) > max_age)
    }

    fn overwrite(&mut self, id: NodeId, key: K, value: V, size: usize, now: Instant) {
        let Some(entry) = self.list.get_mut(id) else {
            return;
        };
        let old_value = mem::replace(&mut entry.value, value);
        self.size = self.size - entry.size + size;
        entry.size = size;
        entry.updated_at = now;
        self.list.move_to_front(id);
        self.notify(&old_value, &key);
    }

    /// Evict from the tail until the total size fits.
    fn trim(&mut self) {
        let Some(max_size) = self.max_size else {
            return;
        };
        while self.size > max_size {
            let Some(id) = self.list.back_id() else {
                break;
            };
            trace!(size = self.size, max_size, "evicting least recently used entry");
            self.destroy(id);
        }
    }

    fn destroy(&mut self, id: NodeId) -> bool {
        let Some(entry) = self.list.remove(id) else {
            return false;
        };
        self.map.remove(&entry.key);
        self.size -= entry.size;
        self.notify(&entry.value, &entry.key);
        true
    }

    fn notify(&mut self, value: &V, key: &K) {
        for listener in &mut self.listeners {
            listener(value, key);
        }
    }

    /// Checks that the map, the list and the size agree.
    #[cfg(test)]
    fn check(&self) {
        self.list.check();
        assert_eq!(self.map.len(), self.list.len(), "map and list disagree");
        for (key, id) in &self.map {
            let entry = self.list.get(*id);
            assert!(entry.is_some_and(|entry| entry.key == *key), "map points at wrong node");
        }
        let total: usize = self.list.iter().map(|entry| entry.size).sum();
        assert_eq!(total, self.size, "size mismatch");
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V> Default for LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(self.list.iter().map(|entry| (&entry.key, &entry.value)))
            .finish()
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
