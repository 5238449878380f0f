//! boundkit: fixed-capacity containers.
//!
//! - [`policy::lru::LruCache`]: O(1) LRU cache over a preallocated slot arena.
//! - [`ds::spsc`]: lock-free bounded single-producer/single-consumer queue.
//! - [`ds::RingBuffer`] and [`ds::RangeList`]: single-threaded siblings.
//!
//! See `DESIGN.md` for where each piece comes from and the invariants it keeps.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
