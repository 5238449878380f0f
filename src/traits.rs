//! # Cache Traits
//!
//! The cache surface is split the same way the operations are split by
//! their effect on recency:
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert / get / contains / len /        │
//!   │  capacity / clear                       │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove(&K) → Option<V>                 │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! [`LruCache`](crate::policy::lru::LruCache) implements all three. Generic
//! code, such as the heap profiler's workloads, is written against these
//! traits rather than the concrete type.
//!
//! The queues and buffers in [`ds`](crate::ds) have no key space and do not
//! implement these traits.

/// Operations every bounded cache supports.
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, returning the previous value if present.
    ///
    /// When the cache is full and `key` is new, one entry is evicted first.
    ///
    /// ```
    /// use boundkit::policy::lru::LruCache;
    /// use boundkit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(4);
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "first"), None);
    /// assert_eq!(CoreCache::insert(&mut cache, 1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a value, updating eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks membership without updating eviction order.
    fn contains(&self, key: &K) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries held at once.
    fn capacity(&self) -> usize;

    fn clear(&mut self);
}

/// Caches that support removal by key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value. Absent keys are a no-op.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes each key in order, returning the removed values.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|key| self.remove(key)).collect()
    }
}

/// Recency-ordered caches.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without changing order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Promotes `key` to most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::lru::LruCache;

    fn fill<C: CoreCache<u32, u32>>(cache: &mut C, n: u32) {
        for i in 0..n {
            cache.insert(i, i * 10);
        }
    }

    #[test]
    fn generic_fill_respects_capacity() {
        let mut cache = LruCache::new(3);
        fill(&mut cache, 5);
        assert_eq!(CoreCache::len(&cache), 3);
        assert!(!CoreCache::is_empty(&cache));
        assert!(!CoreCache::contains(&cache, &0));
        assert!(CoreCache::contains(&cache, &4));
    }

    #[test]
    fn remove_batch_reports_each_key() {
        let mut cache = LruCache::new(4);
        fill(&mut cache, 2);
        let removed = MutableCache::remove_batch(&mut cache, &[0, 7, 1]);
        assert_eq!(removed, vec![Some(0), None, Some(10)]);
        assert!(CoreCache::is_empty(&cache));
    }

    #[test]
    fn lru_trait_pop_follows_touch() {
        let mut cache = LruCache::new(3);
        fill(&mut cache, 3);
        assert!(LruCacheTrait::touch(&mut cache, &0));
        assert!(!LruCacheTrait::touch(&mut cache, &9));
        assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&1, &10)));
        assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((1, 10)));
    }
}
