//! # Metrics Traits
//!
//! Recording, snapshotting, and exporting are kept in separate traits so the
//! containers only ever write counters:
//!
//! ```text
//!   ┌─────────────────────────┐      ┌──────────────────────────────┐
//!   │   CoreMetricsRecorder   │      │  ProducerMetricsRecorder     │
//!   │ get_hit/get_miss/insert │      │  push_ok/push_full/refresh   │
//!   │ evict/clear             │      └──────────────────────────────┘
//!   └───────────┬─────────────┘      ┌──────────────────────────────┐
//!               ▼                    │  ConsumerMetricsRecorder     │
//!   ┌─────────────────────────┐      │  pop_ok/pop_empty/refresh    │
//!   │   LruMetricsRecorder    │      └──────────────────────────────┘
//!   │ pop_lru/touch/remove    │
//!   └─────────────────────────┘
//!
//!   Consumption:
//!   MetricsSnapshotProvider<S>  (tests, benches)
//!   MetricsExporter<S>          (monitoring, e.g. Prometheus text)
//! ```
//!
//! SPSC recorders live inside the producer and consumer handles, which are
//! each owned by one thread, so they take `&mut self` and use plain `u64`s.

/// Counters shared by every cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Recency-specific counters for the LRU cache.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Read-path LRU counters for `&self` methods.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
}

/// Producer-side SPSC counters.
pub trait ProducerMetricsRecorder {
    fn record_push_ok(&mut self);
    fn record_push_full(&mut self);
    /// The cached read cursor looked full and was reloaded.
    fn record_read_cursor_refresh(&mut self);
}

/// Consumer-side SPSC counters.
pub trait ConsumerMetricsRecorder {
    fn record_pop_ok(&mut self);
    fn record_pop_empty(&mut self);
    /// The cached write cursor looked empty and was reloaded.
    fn record_write_cursor_refresh(&mut self);
}

/// Produces a point-in-time copy of a container's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
