//! Arena-backed LRU cache.
//!
//! Every entry lives in a [`SlotArena`] allocated once at construction. The
//! recency list is threaded through the arena's `prev`/`next` links by
//! [`SlotId`], and the lookup index maps keys to `SlotId`s, so no operation
//! allocates once the cache is built.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          arena: SlotArena<(K, V)>
//!   ┌──────┬────────┐                    ┌─────┬─────────┬──────┬──────┐
//!   │ key  │ SlotId │                    │ idx │ entry   │ prev │ next │
//!   ├──────┼────────┤                    ├─────┼─────────┼──────┼──────┤
//!   │  a   │   0    │──────────────────► │  0  │ (a, 1)  │  2   │  -   │
//!   │  b   │   2    │──────────────────► │  1  │  free   │  -   │  -   │
//!   └──────┴────────┘                    │  2  │ (b, 2)  │  -   │  0   │
//!                                        └─────┴─────────┴──────┴──────┘
//!
//!   head (MRU) ─► [2: b] ◄──► [0: a] ◄── tail (LRU)
//!   free_head  ─► [1]
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Recency effect          |
//! |-------------|------|-------------------------|
//! | `get`       | O(1) | promotes to MRU         |
//! | `put`       | O(1) | promotes / inserts MRU  |
//! | `peek`      | O(1) | none                    |
//! | `contains`  | O(1) | none                    |
//! | `remove`    | O(1) | unlinks, frees slot     |
//! | `pop_lru`   | O(1) | unlinks tail            |
//!
//! ## Thread Safety
//!
//! `LruCache` is single-owner: every mutation takes `&mut self`. Wrap it in a
//! lock to share it, or use
//! [`ConcurrentLruCache`](crate::policy::concurrent_lru::ConcurrentLruCache)
//! with the `concurrency` feature.
//!
//! ## Example
//!
//! ```
//! use boundkit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(3);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.put(3, "three");
//!
//! // Touch 1 so 2 becomes the LRU entry.
//! assert_eq!(cache.get(&1), Some(&"one"));
//! cache.put(4, "four");
//!
//! assert!(!cache.contains(&2));
//! assert_eq!(cache.len(), 3);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};

/// Fixed-capacity least-recently-used cache.
#[derive(Debug)]
pub struct LruCache<K, V> {
    index: FxHashMap<K, SlotId>,
    arena: SlotArena<(K, V)>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache, returning [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("lru cache"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            arena: SlotArena::try_with_capacity(capacity)?,
            head: None,
            tail: None,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Alias for [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Returns `true` if `key` is cached. Does not change recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Alias for [`contains`](Self::contains).
    #[inline]
    pub fn exists(&self, key: &K) -> bool {
        self.contains(key)
    }

    /// Returns the value for `key` and promotes it to most recently used.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.promote(id);
        self.arena.get(id).map(|(_, value)| value)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.promote(id);
        self.arena.get_mut(id).map(|(_, value)| value)
    }

    /// Returns the value for `key` without changing recency.
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.index.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        self.arena.get(id).map(|(_, value)| value)
    }

    /// Inserts or overwrites `key` and makes it most recently used.
    ///
    /// Returns the previous value when `key` was already present. A new key
    /// arriving at a full cache evicts the LRU entry first.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let old = self
                .arena
                .get_mut(id)
                .map(|(_, slot_value)| std::mem::replace(slot_value, value));
            self.promote(id);
            return old;
        }

        if self.arena.is_full() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if self.evict_lru().is_some() {
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = match self.arena.alloc((key.clone(), value)) {
            Ok(id) => id,
            Err(_) => unreachable!("lru arena has no free slot after eviction"),
        };
        self.index.insert(key, id);
        self.link_front(id);
        None
    }

    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let id = self.index.remove(key)?;
        self.unlink(id);
        let (_, value) = self.arena.free(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        Some(value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.evict_lru()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some(entry)
    }

    /// Returns the least recently used entry without changing recency.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let (key, value) = self.arena.get(self.tail?)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((key, value))
    }

    /// Promotes `key` to most recently used; returns `false` if absent.
    pub fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(&id) = self.index.get(key) else {
            return false;
        };
        self.promote(id);

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        true
    }

    /// Drops every entry. The arena keeps its allocation.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            current: self.head,
        }
    }

    /// Walks the recency list, the free list, and the index and checks that
    /// they agree: every slot is on exactly one list, links are symmetric,
    /// and each index entry points at the slot holding its key.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.arena.check_invariants()?;

        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new(format!(
                "head {:?} and tail {:?} disagree on emptiness",
                self.head, self.tail
            )));
        }

        let mut count = 0usize;
        let mut prev: Option<SlotId> = None;
        let mut current = self.head;
        while let Some(id) = current {
            count += 1;
            if count > self.arena.len() {
                return Err(InvariantError::new("recency list longer than occupied set"));
            }
            let (key, _) = self.arena.get(id).ok_or_else(|| {
                InvariantError::new(format!("recency list reaches free slot {}", id.index()))
            })?;
            if self.arena.prev(id) != prev {
                return Err(InvariantError::new(format!(
                    "slot {} prev link {:?} != {:?}",
                    id.index(),
                    self.arena.prev(id),
                    prev
                )));
            }
            let next = self.arena.next(id);
            if next == Some(id) || prev == Some(id) {
                return Err(InvariantError::new(format!("slot {} links to itself", id.index())));
            }
            if self.index.get(key) != Some(&id) {
                return Err(InvariantError::new(format!(
                    "index does not map the key in slot {} back to it",
                    id.index()
                )));
            }
            prev = Some(id);
            current = next;
        }

        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "list ends at {:?} but tail is {:?}",
                prev, self.tail
            )));
        }
        if count != self.arena.len() || count != self.index.len() {
            return Err(InvariantError::new(format!(
                "recency list has {} nodes, arena {} occupied, index {} keys",
                count,
                self.arena.len(),
                self.index.len()
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Recency list
    // =========================================================================

    #[inline]
    fn promote(&mut self, id: SlotId) {
        if self.head == Some(id) {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let id = self.tail?;
        self.unlink(id);
        let (key, value) = self.arena.free(id)?;
        self.index.remove(&key);
        Some((key, value))
    }

    fn unlink(&mut self, id: SlotId) {
        let prev = self.arena.prev(id);
        let next = self.arena.next(id);

        match prev {
            Some(prev_id) => self.arena.set_next(prev_id, next),
            None => self.head = next,
        }
        match next {
            Some(next_id) => self.arena.set_prev(next_id, prev),
            None => self.tail = prev,
        }

        self.arena.set_prev(id, None);
        self.arena.set_next(id, None);
    }

    fn link_front(&mut self, id: SlotId) {
        self.arena.set_prev(id, None);
        self.arena.set_next(id, self.head);
        match self.head {
            Some(old_head) => self.arena.set_prev(old_head, Some(id)),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clear_calls: self.metrics.clear_calls,
            cache_len: self.len(),
            capacity: self.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }
}

/// Iterator over `(&K, &V)` from most to least recently used.
pub struct Iter<'a, K, V> {
    arena: &'a SlotArena<(K, V)>,
    current: Option<SlotId>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let (key, value) = self.arena.get(id)?;
        self.current = self.arena.next(id);
        Some((key, value))
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_mru_to_lru<V>(cache: &LruCache<i32, V>) -> Vec<i32> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn put_and_get() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.put(1, "one"), None);
        assert_eq!(cache.get(&1), Some(&"one"));
        assert_eq!(cache.get(&999), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn exists_and_size_mirror_contains_and_len() {
        let mut cache = LruCache::new(3);
        assert_eq!(cache.size(), 0);
        cache.put(1, "one");
        cache.put(2, "two");
        assert!(cache.exists(&1));
        assert!(!cache.exists(&3));
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn evicts_first_inserted_without_access() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.put(4, "four");

        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
        assert_eq!(cache.len(), 3);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn get_updates_recency() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        cache.get(&1);
        cache.put(4, "four");

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
        assert_eq!(keys_mru_to_lru(&cache), vec![4, 1, 3]);
    }

    #[test]
    fn update_existing_key_overwrites_in_place() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.put(1, "ONE"), Some("one"));

        assert_eq!(cache.get(&1), Some(&"ONE"));
        assert_eq!(cache.len(), 2);
        assert_eq!(keys_mru_to_lru(&cache), vec![1, 2]);
    }

    #[test]
    fn update_promotes_so_other_key_is_evicted() {
        let mut cache = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(1, 11);
        cache.put(3, 30);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn repeated_mru_access_keeps_links_sane() {
        let mut cache = LruCache::new(3);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);
        for _ in 0..5 {
            cache.get(&3);
            cache.put(3, 33);
            cache.check_invariants().unwrap();
        }
        cache.put(4, 4);
        assert!(!cache.contains(&1));
        assert_eq!(keys_mru_to_lru(&cache), vec![4, 3, 2]);
    }

    #[test]
    fn capacity_one_replaces_single_entry() {
        let mut cache = LruCache::new(1);
        cache.put("a", 1);
        cache.get(&"a");
        cache.put("b", 2);
        assert!(!cache.contains(&"a"));
        assert_eq!(cache.peek(&"b"), Some(&2));
        assert_eq!(cache.peek_lru(), Some((&"b", &2)));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn remove_then_refill_reuses_slots() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert_eq!(cache.remove(&2), Some("two"));
        assert_eq!(cache.remove(&2), None);
        cache.check_invariants().unwrap();

        cache.put(4, "four");
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&1));
        cache.check_invariants().unwrap();

        cache.put(5, "five");
        assert!(!cache.contains(&1));
        assert_eq!(keys_mru_to_lru(&cache), vec![5, 4, 3]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn remove_only_entry_resets_both_ends() {
        let mut cache = LruCache::new(2);
        cache.put(1, ());
        assert_eq!(cache.remove(&1), Some(()));
        assert!(cache.is_empty());
        assert_eq!(cache.peek_lru(), None);
        assert_eq!(cache.iter().count(), 0);
        cache.check_invariants().unwrap();

        cache.put(2, ());
        assert_eq!(keys_mru_to_lru(&cache), vec![2]);
    }

    #[test]
    fn remove_head_and_tail() {
        let mut cache = LruCache::new(4);
        for i in 1..=4 {
            cache.put(i, i);
        }
        assert_eq!(cache.remove(&4), Some(4));
        assert_eq!(cache.remove(&1), Some(1));
        assert_eq!(keys_mru_to_lru(&cache), vec![3, 2]);
        assert_eq!(cache.peek_lru(), Some((&2, &2)));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn peek_does_not_promote() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert_eq!(cache.peek(&1), Some(&"one"));
        cache.put(4, "four");
        assert!(!cache.contains(&1));
    }

    #[test]
    fn pop_lru_drains_in_recency_order() {
        let mut cache = LruCache::new(4);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        cache.get(&1);

        assert_eq!(cache.pop_lru(), Some((2, "two")));
        assert_eq!(cache.pop_lru(), Some((3, "three")));
        assert_eq!(cache.pop_lru(), Some((1, "one")));
        assert_eq!(cache.pop_lru(), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn touch_promotes() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        assert!(cache.touch(&1));
        assert!(!cache.touch(&42));
        cache.put(4, "four");

        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn get_mut_modifies_and_promotes() {
        let mut cache = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);
        if let Some(v) = cache.get_mut(&1) {
            *v += 1;
        }
        cache.put(3, 30);
        assert_eq!(cache.peek(&1), Some(&11));
        assert!(!cache.contains(&2));
    }

    #[test]
    fn clear_empties_and_allows_reuse() {
        let mut cache = LruCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
        cache.check_invariants().unwrap();

        cache.put(3, "three");
        cache.put(4, "four");
        assert_eq!(cache.len(), 2);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = LruCache::<u8, u8>::try_new(0).unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn zero_capacity_panics() {
        let _ = LruCache::<u8, u8>::new(0);
    }

    #[test]
    fn into_iterator_for_ref() {
        let mut cache = LruCache::new(3);
        cache.put(1, 'a');
        cache.put(2, 'b');
        let collected: Vec<_> = (&cache).into_iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(collected, vec![(2, 'b'), (1, 'a')]);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_evictions() {
        let mut cache = LruCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.get(&1);
        cache.get(&9);
        cache.put(3, 3);
        cache.peek_lru();

        let snap = cache.metrics_snapshot();
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.insert_new, 3);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.peek_lru_calls, 1);
        assert_eq!(snap.peek_lru_found, 1);
        assert_eq!(snap.cache_len, 2);
        assert_eq!(snap.capacity, 2);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Get(u8),
            Put(u8, u16),
            Remove(u8),
            Touch(u8),
            PopLru,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                any::<u8>().prop_map(Op::Get),
                (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Op::Put(k, v)),
                any::<u8>().prop_map(Op::Remove),
                any::<u8>().prop_map(Op::Touch),
                Just(Op::PopLru),
            ]
        }

        proptest! {
            /// Property: len never exceeds capacity and the structure stays
            /// consistent after every operation.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_invariants_hold(
                capacity in 1usize..16,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let mut cache: LruCache<u8, u16> = LruCache::new(capacity);
                for op in ops {
                    match op {
                        Op::Get(k) => { cache.get(&(k % 32)); }
                        Op::Put(k, v) => { cache.put(k % 32, v); }
                        Op::Remove(k) => { cache.remove(&(k % 32)); }
                        Op::Touch(k) => { cache.touch(&(k % 32)); }
                        Op::PopLru => { cache.pop_lru(); }
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
            }

            /// Property: recency order matches a Vec-based reference model.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..8,
                ops in prop::collection::vec(op_strategy(), 0..150)
            ) {
                let mut cache: LruCache<u8, u16> = LruCache::new(capacity);
                // MRU at index 0.
                let mut model: Vec<(u8, u16)> = Vec::new();

                for op in ops {
                    match op {
                        Op::Get(k) => {
                            let k = k % 16;
                            let expected = model.iter().position(|(mk, _)| *mk == k).map(|pos| {
                                let entry = model.remove(pos);
                                model.insert(0, entry);
                                entry.1
                            });
                            prop_assert_eq!(cache.get(&k).copied(), expected);
                        }
                        Op::Put(k, v) => {
                            let k = k % 16;
                            let old = model.iter().position(|(mk, _)| *mk == k).map(|pos| model.remove(pos).1);
                            if old.is_none() && model.len() == capacity {
                                model.pop();
                            }
                            model.insert(0, (k, v));
                            prop_assert_eq!(cache.put(k, v), old);
                        }
                        Op::Remove(k) => {
                            let k = k % 16;
                            let expected = model.iter().position(|(mk, _)| *mk == k).map(|pos| model.remove(pos).1);
                            prop_assert_eq!(cache.remove(&k), expected);
                        }
                        Op::Touch(k) => {
                            let k = k % 16;
                            let found = model.iter().position(|(mk, _)| *mk == k).map(|pos| {
                                let entry = model.remove(pos);
                                model.insert(0, entry);
                            }).is_some();
                            prop_assert_eq!(cache.touch(&k), found);
                        }
                        Op::PopLru => {
                            prop_assert_eq!(cache.pop_lru(), model.pop());
                        }
                    }
                    let order: Vec<(u8, u16)> = cache.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(order, model.clone());
                }
            }
        }
    }
}
