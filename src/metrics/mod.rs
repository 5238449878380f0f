//! Feature-gated (`metrics`) counters, snapshots, and exporters.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
