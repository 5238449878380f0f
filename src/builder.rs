//! Capacity-driven builder for every container in the crate.
//!
//! ## Example
//!
//! ```rust
//! use boundkit::builder::Builder;
//!
//! let mut cache = Builder::new(100).build_lru::<u64, String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//!
//! let (mut tx, mut rx) = Builder::new(8).build_spsc::<u32>();
//! tx.push(7).unwrap();
//! assert_eq!(rx.pop(), Some(7));
//!
//! let ring = Builder::new(4).overwrite(true).build_ring_buffer::<u8>();
//! assert!(ring.overwrites());
//! ```

use std::hash::Hash;

use crate::ds::ring_buffer::RingBuffer;
use crate::ds::spsc::{Consumer, Producer, SpscQueue};
use crate::error::ConfigError;
use crate::policy::lru::LruCache;

#[cfg(feature = "concurrency")]
use crate::policy::concurrent_lru::ConcurrentLruCache;

/// Shared settings for building bounded containers.
///
/// The `build_*` methods panic on invalid settings; the `try_build_*`
/// variants return [`ConfigError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builder {
    capacity: usize,
    overwrite: bool,
}

impl Builder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            overwrite: false,
        }
    }

    /// Ring buffers only: evict the oldest item instead of rejecting a push.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn build_lru<K, V>(self) -> LruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        unwrap_config(self.try_build_lru())
    }

    pub fn try_build_lru<K, V>(self) -> Result<LruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        LruCache::try_new(self.capacity)
    }

    pub fn build_spsc<T>(self) -> (Producer<T>, Consumer<T>) {
        unwrap_config(self.try_build_spsc())
    }

    pub fn try_build_spsc<T>(self) -> Result<(Producer<T>, Consumer<T>), ConfigError> {
        Ok(SpscQueue::try_new(self.capacity)?.split())
    }

    pub fn build_ring_buffer<T>(self) -> RingBuffer<T> {
        unwrap_config(self.try_build_ring_buffer())
    }

    pub fn try_build_ring_buffer<T>(self) -> Result<RingBuffer<T>, ConfigError> {
        if self.overwrite {
            RingBuffer::try_with_overwrite(self.capacity)
        } else {
            RingBuffer::try_new(self.capacity)
        }
    }

    #[cfg(feature = "concurrency")]
    pub fn build_concurrent_lru<K, V>(self) -> ConcurrentLruCache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        unwrap_config(self.try_build_concurrent_lru())
    }

    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent_lru<K, V>(self) -> Result<ConcurrentLruCache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        ConcurrentLruCache::try_new(self.capacity)
    }
}

fn unwrap_config<T>(result: Result<T, ConfigError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_container_with_capacity() {
        let builder = Builder::new(3);
        assert_eq!(builder.build_lru::<u32, u32>().capacity(), 3);
        assert_eq!(builder.build_ring_buffer::<u32>().capacity(), 3);
        let (tx, rx) = builder.build_spsc::<u32>();
        assert_eq!(tx.capacity(), 3);
        assert_eq!(rx.capacity(), 3);
    }

    #[test]
    fn overwrite_only_affects_ring_buffer() {
        let mut ring = Builder::new(2).overwrite(true).build_ring_buffer();
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        assert!(ring.push(3).is_ok());
        assert_eq!(ring.front(), Some(&2));

        let plain = Builder::new(2).build_ring_buffer::<u8>();
        assert!(!plain.overwrites());
    }

    #[test]
    fn zero_capacity_is_a_config_error() {
        let builder = Builder::new(0);
        assert!(builder.try_build_lru::<u8, u8>().is_err());
        assert!(builder.try_build_spsc::<u8>().is_err());
        let err = builder.overwrite(true).try_build_ring_buffer::<u8>().unwrap_err();
        assert_eq!(err.message(), "ring buffer capacity must be greater than zero");
    }

    #[test]
    #[should_panic(expected = "lru cache capacity must be greater than zero")]
    fn build_panics_on_zero_capacity() {
        let _ = Builder::new(0).build_lru::<u8, u8>();
    }

    #[cfg(feature = "concurrency")]
    #[test]
    fn builds_concurrent_lru() {
        let cache = Builder::new(2).build_concurrent_lru::<u8, u8>();
        cache.put(1, 1);
        assert_eq!(cache.get(&1), Some(1));
    }
}
