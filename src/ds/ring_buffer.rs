//! Fixed-capacity circular FIFO buffer with optional overwrite-on-full.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Box<[Option<T>]>            capacity = 5, len = 3
//!
//!     index:   0      1      2      3      4
//!           ┌──────┬──────┬──────┬──────┬──────┐
//!           │  c   │ None │ None │  a   │  b   │
//!           └──────┴──────┴──────┴──────┴──────┘
//!                    ▲             ▲
//!                    tail          head (oldest)
//!
//!   tail = (head + len) % capacity
//! ```
//!
//! `push` writes at `tail`. When the buffer is full it either rejects the
//! value (the default) or, in overwrite mode, drops the item at `head` and
//! advances both ends.
//!
//! Single-threaded; for a cross-thread bounded queue use
//! [`SpscQueue`](crate::ds::SpscQueue).
//!
//! ## Example
//!
//! ```
//! use boundkit::ds::RingBuffer;
//!
//! let mut ring = RingBuffer::with_overwrite(2);
//! ring.push(1).unwrap();
//! ring.push(2).unwrap();
//! ring.push(3).unwrap();
//!
//! assert_eq!(ring.pop(), Some(2));
//! assert_eq!(ring.back(), Some(&3));
//! ```

use crate::error::{ConfigError, InvariantError};

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
    overwrite: bool,
}

impl<T> RingBuffer<T> {
    /// Creates a buffer that rejects pushes when full.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(ring) => ring,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a buffer whose pushes evict the oldest item when full.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_overwrite(capacity: usize) -> Self {
        match Self::try_with_overwrite(capacity) {
            Ok(ring) => ring,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_overwrite(capacity: usize) -> Result<Self, ConfigError> {
        let mut ring = Self::try_new(capacity)?;
        ring.overwrite = true;
        Ok(ring)
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("ring buffer"));
        }
        Ok(Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
            overwrite: false,
        })
    }

    /// Appends `value` at the back.
    ///
    /// A full buffer returns `Err(value)` unless overwrite mode is on, in
    /// which case the oldest item is dropped and the push succeeds.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() && !self.overwrite {
            return Err(value);
        }
        self.push_overwrite(value);
        Ok(())
    }

    /// Appends `value`, returning the oldest item if it had to be displaced.
    ///
    /// Ignores the overwrite setting.
    pub fn push_overwrite(&mut self, value: T) -> Option<T> {
        let tail = self.wrap(self.head + self.len);
        let displaced = self.slots[tail].replace(value);
        if self.is_full() {
            self.head = self.wrap(self.head + 1);
        } else {
            self.len += 1;
        }
        displaced
    }

    /// Removes and returns the oldest item.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.wrap(self.head + 1);
        self.len -= 1;
        value
    }

    /// Drops the oldest item. Returns `false` if the buffer was empty.
    pub fn discard(&mut self) -> bool {
        self.pop().is_some()
    }

    /// Oldest item.
    pub fn front(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Newest item.
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.wrap(self.head + self.len - 1)].as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether pushes on a full buffer evict the oldest item.
    #[inline]
    pub fn overwrites(&self) -> bool {
        self.overwrite
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.slots[self.wrap(self.head + i)].as_ref())
    }

    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Checks that exactly the `len` slots starting at `head` are occupied.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let capacity = self.slots.len();
        if self.head >= capacity {
            return Err(InvariantError::new(format!(
                "head {} outside ring of {}",
                self.head, capacity
            )));
        }
        if self.len > capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len, capacity
            )));
        }
        for offset in 0..capacity {
            let occupied = self.slots[self.wrap(self.head + offset)].is_some();
            let expected = offset < self.len;
            if occupied != expected {
                return Err(InvariantError::new(format!(
                    "slot at offset {} from head is {} but len is {}",
                    offset,
                    if occupied { "occupied" } else { "empty" },
                    self.len
                )));
            }
        }
        Ok(())
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index % self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order_and_wraparound() {
        let mut ring = RingBuffer::new(3);
        for round in 0..10 {
            assert!(ring.push(round * 2).is_ok());
            assert!(ring.push(round * 2 + 1).is_ok());
            assert_eq!(ring.pop(), Some(round * 2));
            assert_eq!(ring.pop(), Some(round * 2 + 1));
            ring.check_invariants().unwrap();
        }
        assert!(ring.is_empty());
    }

    #[test]
    fn full_buffer_rejects_without_overwrite() {
        let mut ring = RingBuffer::new(2);
        ring.push("a").unwrap();
        ring.push("b").unwrap();
        assert!(ring.is_full());
        assert_eq!(ring.push("c"), Err("c"));
        assert_eq!(ring.front(), Some(&"a"));
        assert_eq!(ring.back(), Some(&"b"));
        assert!(!ring.overwrites());
    }

    #[test]
    fn overwrite_mode_drops_oldest() {
        let mut ring = RingBuffer::with_overwrite(3);
        for i in 0..5 {
            assert!(ring.push(i).is_ok());
        }
        assert!(ring.overwrites());
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        ring.check_invariants().unwrap();
    }

    #[test]
    fn push_overwrite_returns_displaced() {
        let mut ring = RingBuffer::new(2);
        assert_eq!(ring.push_overwrite(1), None);
        assert_eq!(ring.push_overwrite(2), None);
        assert_eq!(ring.push_overwrite(3), Some(1));
        assert_eq!(ring.front(), Some(&2));
    }

    #[test]
    fn discard_and_empty_accessors() {
        let mut ring = RingBuffer::new(2);
        assert!(!ring.discard());
        assert_eq!(ring.front(), None);
        assert_eq!(ring.back(), None);
        assert_eq!(ring.pop(), None);

        ring.push(7).unwrap();
        assert!(ring.discard());
        assert!(ring.is_empty());
    }

    #[test]
    fn clear_resets_cursor() {
        let mut ring = RingBuffer::new(3);
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        ring.pop();
        ring.clear();
        assert!(ring.is_empty());
        ring.push(9).unwrap();
        assert_eq!(ring.front(), Some(&9));
        ring.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(RingBuffer::<u8>::try_new(0).is_err());
        assert!(RingBuffer::<u8>::try_with_overwrite(0).is_err());
    }

    #[test]
    fn try_with_overwrite_sets_mode() {
        let mut ring = RingBuffer::try_with_overwrite(2).unwrap();
        assert!(ring.overwrites());
        ring.push(1).unwrap();
        ring.push(2).unwrap();
        assert!(ring.push(3).is_ok());
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        proptest! {
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_overwrite_keeps_newest(
                capacity in 1usize..8,
                values in prop::collection::vec(any::<u16>(), 0..64)
            ) {
                let mut ring = RingBuffer::with_overwrite(capacity);
                let mut model = VecDeque::new();
                for v in values {
                    prop_assert!(ring.push(v).is_ok());
                    if model.len() == capacity {
                        model.pop_front();
                    }
                    model.push_back(v);
                    prop_assert!(ring.check_invariants().is_ok());
                }
                prop_assert_eq!(ring.iter().copied().collect::<Vec<_>>(), Vec::from(model));
            }
        }
    }
}
