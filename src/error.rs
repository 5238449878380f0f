//! Error types for boundkit.
//!
//! Expected negative outcomes (missing key, full queue, empty buffer) are
//! never errors; they come back as `Option` or `Result<_, T>` from the
//! operation itself. The types here cover the two remaining cases:
//!
//! - [`ConfigError`]: a container was constructed with invalid parameters
//!   (zero capacity).
//! - [`InvariantError`]: a `check_invariants` walk found corrupted internal
//!   state. Only expected in tests and fuzz targets.
//!
//! ```
//! use boundkit::error::ConfigError;
//! use boundkit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, u64>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
//! assert!(err.to_string().contains("capacity"));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned by fallible constructors (`try_new`, `try_build_*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// The error every container reports for `capacity == 0`.
    pub fn zero_capacity(container: &str) -> Self {
        Self(format!("{container} capacity must be greater than zero"))
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a structural invariant does not hold.
///
/// Produced by [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants),
/// [`SlotArena::check_invariants`](crate::ds::SlotArena::check_invariants) and
/// [`RingBuffer::check_invariants`](crate::ds::RingBuffer::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
