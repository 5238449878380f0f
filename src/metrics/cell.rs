use std::sync::atomic::{AtomicU64, Ordering};

/// A counter that can be bumped through `&self`.
///
/// Used for read-path metrics (`peek`, `peek_lru`) where the cache is only
/// borrowed immutably, possibly by several readers holding a shared lock.
/// Relaxed ordering is enough: counters are observational and never gate
/// any other memory access.
#[derive(Debug, Default)]
pub struct MetricsCell(AtomicU64);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn incr(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}
