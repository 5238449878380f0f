//! Lock-guarded LRU cache for shared access (feature `concurrency`).
//!
//! [`LruCache`] itself has no concurrency contract. This wrapper puts the
//! whole cache behind one `parking_lot::RwLock`:
//!
//! - `get` / `get_with` / `put` / `remove` / `touch` / `clear` take the
//!   write lock, since promotion rewrites the recency list.
//! - `peek` / `peek_with` / `contains` / `len` take the read lock.
//!
//! Values are returned by clone (or through a closure) because references
//! cannot outlive the guard.

use std::hash::Hash;

use parking_lot::RwLock;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;

#[derive(Debug)]
pub struct ConcurrentLruCache<K, V> {
    inner: RwLock<LruCache<K, V>>,
}

impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: RwLock::new(LruCache::try_new(capacity)?),
        })
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self {
            inner: RwLock::new(cache),
        }
    }

    /// Returns a clone of the value and promotes `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.write().get(key).cloned()
    }

    /// Applies `f` to the value under the write lock and promotes `key`.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.write().get(key).map(f)
    }

    /// Returns a clone of the value without promoting.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().peek(key).cloned()
    }

    pub fn peek_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        self.inner.read().peek(key).map(f)
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().put(key, value)
    }

    /// Inserts without blocking; returns `Err((key, value))` if the lock is held.
    pub fn try_put(&self, key: K, value: V) -> Result<Option<V>, (K, V)> {
        match self.inner.try_write() {
            Some(mut cache) => Ok(cache.put(key, value)),
            None => Err((key, value)),
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().remove(key)
    }

    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, V)> {
        self.inner.write().pop_lru()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn into_inner(self) -> LruCache<K, V> {
        self.inner.into_inner()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}
