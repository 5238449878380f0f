//! Lock-free bounded single-producer/single-consumer queue.
//!
//! ## Layout
//!
//! ```text
//!   SpscQueue<T> (shared through Arc)
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ slots: [UnsafeCell<MaybeUninit<T>>; N.next_power_of_two()]   │
//!   │ write: CachePadded<AtomicUsize>   ◄── producer stores        │
//!   │ read:  CachePadded<AtomicUsize>   ◄── consumer stores        │
//!   └──────────────────────────────────────────────────────────────┘
//!        ▲                                      ▲
//!   Producer { cached_read }               Consumer { cached_write }
//! ```
//!
//! Both cursors count items ever pushed / popped and wrap on overflow, and
//! `write - read` is the occupancy, never more than `N`. The slot array is
//! rounded up to a power of two and the slot for cursor `c` is `c & mask`,
//! so the mapping stays contiguous when a cursor wraps past `usize::MAX`.
//! Slots for cursors in `[read, write)` are initialized, everything else is
//! not.
//!
//! ## Ordering
//!
//! ```text
//!   producer: write slot  →  Release store write+1  →  consumer: Acquire load write, read slot
//!   consumer: read slot   →  Release store read+1   →  producer: Acquire load read, reuse slot
//! ```
//!
//! Each side loads its own cursor `Relaxed` (it is the only writer) and keeps
//! a cached copy of the other side's cursor. The cache is only refreshed when
//! it claims the queue is full (producer) or empty (consumer), so the common
//! path never touches the other side's cache line.
//!
//! ## Roles
//!
//! [`SpscQueue::split`] hands out exactly one [`Producer`] and one
//! [`Consumer`]. Neither is `Clone`, and `push`/`pop` take `&mut self`, so a
//! second writer of either cursor cannot be created in safe code.
//!
//! ## Example
//!
//! ```
//! use boundkit::ds::spsc;
//!
//! let (mut tx, mut rx) = spsc::channel::<u32>(2);
//! assert!(tx.push(1).is_ok());
//! assert!(tx.push(2).is_ok());
//! assert_eq!(tx.push(3), Err(3));
//!
//! assert_eq!(rx.pop(), Some(1));
//! assert_eq!(rx.pop(), Some(2));
//! assert_eq!(rx.pop(), None);
//! ```

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::MaybeUninit;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use crate::error::ConfigError;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::{ConsumerMetrics, ProducerMetrics};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::{ConsumerMetricsSnapshot, ProducerMetricsSnapshot};
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    ConsumerMetricsRecorder, MetricsSnapshotProvider, ProducerMetricsRecorder,
};

/// Shared ring storage and the two authoritative cursors.
pub struct SpscQueue<T> {
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
    mask: usize,
    capacity: usize,
    write: CachePadded<AtomicUsize>,
    read: CachePadded<AtomicUsize>,
}

// SAFETY: a slot is written only by the producer while outside [read, write)
// and read only by the consumer while inside it. The Release/Acquire pairs on
// the cursors order every slot access against the cursor move that hands the
// slot to the other side.
unsafe impl<T: Send> Send for SpscQueue<T> {}
unsafe impl<T: Send> Sync for SpscQueue<T> {}

impl<T> SpscQueue<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(queue) => queue,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("spsc queue"));
        }
        let slot_count = capacity.checked_next_power_of_two().ok_or_else(|| {
            ConfigError::new(format!("spsc queue capacity {} is too large", capacity))
        })?;
        let slots = (0..slot_count)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect();
        Ok(Self {
            slots,
            mask: slot_count - 1,
            capacity,
            write: CachePadded::new(AtomicUsize::new(0)),
            read: CachePadded::new(AtomicUsize::new(0)),
        })
    }

    /// Splits the queue into its producer and consumer handles.
    pub fn split(mut self) -> (Producer<T>, Consumer<T>) {
        let cached_read = *self.read.get_mut();
        let cached_write = *self.write.get_mut();
        let queue = Arc::new(self);
        let producer = Producer {
            queue: Arc::clone(&queue),
            cached_read,
            #[cfg(feature = "metrics")]
            metrics: ProducerMetrics::default(),
        };
        let consumer = Consumer {
            queue,
            cached_write,
            #[cfg(feature = "metrics")]
            metrics: ConsumerMetrics::default(),
        };
        (producer, consumer)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued items. Advisory when the other side is active.
    pub fn len(&self) -> usize {
        // Read first: write can only have grown since, so the difference
        // never underflows. It can overshoot by whatever the consumer freed
        // in between, hence the clamp.
        let read = self.read.load(Ordering::Acquire);
        let write = self.write.load(Ordering::Acquire);
        write.wrapping_sub(read).min(self.capacity())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    #[inline]
    fn slot(&self, cursor: usize) -> &UnsafeCell<MaybeUninit<T>> {
        &self.slots[cursor & self.mask]
    }
}

impl<T> Drop for SpscQueue<T> {
    fn drop(&mut self) {
        let mut read = *self.read.get_mut();
        let write = *self.write.get_mut();
        let mask = self.mask;
        while read != write {
            // SAFETY: slots in [read, write) are initialized and nothing else
            // can observe the queue once it is being dropped.
            unsafe { self.slots[read & mask].get_mut().assume_init_drop() };
            read = read.wrapping_add(1);
        }
    }
}

impl<T> fmt::Debug for SpscQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpscQueue")
            .field("capacity", &self.capacity())
            .field("write", &self.write.load(Ordering::Relaxed))
            .field("read", &self.read.load(Ordering::Relaxed))
            .finish()
    }
}

/// Creates a queue with `capacity` slots and splits it.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn channel<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    SpscQueue::new(capacity).split()
}

/// The producing half. Owns the write cursor.
pub struct Producer<T> {
    queue: Arc<SpscQueue<T>>,
    cached_read: usize,
    #[cfg(feature = "metrics")]
    metrics: ProducerMetrics,
}

impl<T> Producer<T> {
    /// Appends `value`, or hands it back as `Err(value)` if the queue is full.
    ///
    /// Never blocks. A rejected push leaves the queue unchanged.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), T> {
        let queue = &*self.queue;
        let capacity = queue.capacity();
        let write = queue.write.load(Ordering::Relaxed);

        if write.wrapping_sub(self.cached_read) >= capacity {
            self.cached_read = queue.read.load(Ordering::Acquire);

            #[cfg(feature = "metrics")]
            self.metrics.record_read_cursor_refresh();

            if write.wrapping_sub(self.cached_read) >= capacity {
                #[cfg(feature = "metrics")]
                self.metrics.record_push_full();

                return Err(value);
            }
        }

        // SAFETY: write - read < capacity <= slot count, and the slot count
        // divides 2^usize::BITS, so this slot belongs to no cursor in
        // [read, write) even across wraparound. The consumer will not touch it until the store
        // below publishes it.
        unsafe { (*queue.slot(write).get()).write(value) };
        queue.write.store(write.wrapping_add(1), Ordering::Release);

        #[cfg(feature = "metrics")]
        self.metrics.record_push_ok();

        Ok(())
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("queue", &self.queue)
            .field("cached_read", &self.cached_read)
            .finish()
    }
}

/// The consuming half. Owns the read cursor.
pub struct Consumer<T> {
    queue: Arc<SpscQueue<T>>,
    cached_write: usize,
    #[cfg(feature = "metrics")]
    metrics: ConsumerMetrics,
}

impl<T> Consumer<T> {
    /// Removes the oldest value, or returns `None` if the queue is empty.
    ///
    /// Never blocks. An empty pop leaves the queue unchanged.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let Some(read) = self.available() else {
            #[cfg(feature = "metrics")]
            self.metrics.record_pop_empty();

            return None;
        };
        let queue = &*self.queue;

        // SAFETY: `available` established read != write, so the slot is
        // initialized, and the producer will not reuse it until the store
        // below releases it.
        let value = unsafe { (*queue.slot(read).get()).assume_init_read() };
        queue.read.store(read.wrapping_add(1), Ordering::Release);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_ok();

        Some(value)
    }

    /// Borrows the oldest value without removing it.
    pub fn peek(&mut self) -> Option<&T> {
        let read = self.available()?;
        // SAFETY: as in `pop`; the borrow of `self` keeps the read cursor,
        // and therefore the slot, pinned while the reference lives.
        Some(unsafe { (*self.queue.slot(read).get()).assume_init_ref() })
    }

    /// Returns the current read cursor if at least one item is queued.
    #[inline]
    fn available(&mut self) -> Option<usize> {
        let queue = &*self.queue;
        let read = queue.read.load(Ordering::Relaxed);

        if read == self.cached_write {
            self.cached_write = queue.write.load(Ordering::Acquire);

            #[cfg(feature = "metrics")]
            self.metrics.record_write_cursor_refresh();

            if read == self.cached_write {
                return None;
            }
        }
        Some(read)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("queue", &self.queue)
            .field("cached_write", &self.cached_write)
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<ProducerMetricsSnapshot> for Producer<T> {
    fn snapshot(&self) -> ProducerMetricsSnapshot {
        ProducerMetricsSnapshot {
            push_calls: self.metrics.push_calls,
            push_ok: self.metrics.push_ok,
            push_full: self.metrics.push_full,
            read_cursor_refreshes: self.metrics.read_cursor_refreshes,
            queue_len: self.len(),
            capacity: self.capacity(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<ConsumerMetricsSnapshot> for Consumer<T> {
    fn snapshot(&self) -> ConsumerMetricsSnapshot {
        ConsumerMetricsSnapshot {
            pop_calls: self.metrics.pop_calls,
            pop_ok: self.metrics.pop_ok,
            pop_empty: self.metrics.pop_empty,
            write_cursor_refreshes: self.metrics.write_cursor_refreshes,
            queue_len: self.len(),
            capacity: self.capacity(),
        }
    }
}
