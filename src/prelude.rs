pub use crate::builder::Builder;
pub use crate::ds::{Consumer, Producer, RangeList, RingBuffer, SlotArena, SlotId, SpscQueue};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

#[cfg(feature = "concurrency")]
pub use crate::policy::concurrent_lru::ConcurrentLruCache;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{
    ConsumerMetricsSnapshot, LruMetricsSnapshot, ProducerMetricsSnapshot,
};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
