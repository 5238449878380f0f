//! Fixed-capacity slot arena with an intrusive free list.
//!
//! All slots are allocated once, up front. Every slot carries a `prev`/`next`
//! link pair: while a slot is occupied the owner threads it into whatever
//! list it maintains (the LRU recency list), and while it is free `next`
//! threads it into the arena's own free list.
//!
//! ```text
//!   slots: Box<[Slot<T>]>
//!   ┌─────┬──────────────┬──────┬──────┐
//!   │ idx │ value        │ prev │ next │
//!   ├─────┼──────────────┼──────┼──────┤
//!   │  0  │ Some(A)      │  -   │  2   │   owner list: 0 ⇄ 2
//!   │  1  │ None         │  -   │  3   │   free list:  free_head=1 → 3
//!   │  2  │ Some(B)      │  0   │  -   │
//!   │  3  │ None         │  -   │  -   │
//!   └─────┴──────────────┴──────┴──────┘
//! ```
//!
//! `alloc` pops the free head and `free` pushes onto it, so both are O(1) and
//! neither touches the allocator.

use crate::error::{ConfigError, InvariantError};

/// Index of a slot inside a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Box<[Slot<T>]>,
    free_head: Option<SlotId>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an arena with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(arena) => arena,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::zero_capacity("slot arena"));
        }
        let slots = (0..capacity)
            .map(|idx| Slot {
                value: None,
                prev: None,
                next: (idx + 1 < capacity).then_some(SlotId(idx + 1)),
            })
            .collect();
        Ok(Self {
            slots,
            free_head: Some(SlotId(0)),
            len: 0,
        })
    }

    /// Takes a slot off the free list and stores `value` in it.
    ///
    /// Returns `Err(value)` when every slot is occupied.
    pub fn alloc(&mut self, value: T) -> Result<SlotId, T> {
        let Some(id) = self.free_head else {
            return Err(value);
        };
        let slot = &mut self.slots[id.0];
        self.free_head = slot.next;
        slot.value = Some(value);
        slot.prev = None;
        slot.next = None;
        self.len += 1;
        Ok(id)
    }

    /// Empties `id` and pushes it onto the free list head.
    ///
    /// The caller must have unlinked `id` from its own list first.
    pub fn free(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        let value = slot.value.take()?;
        slot.prev = None;
        slot.next = self.free_head;
        self.free_head = Some(id);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.0).and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.0).and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drops every value and rethreads all slots onto the free list.
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            slot.value = None;
            slot.prev = None;
            slot.next = (idx + 1 < capacity).then_some(SlotId(idx + 1));
        }
        self.free_head = Some(SlotId(0));
        self.len = 0;
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.value.as_ref().map(|value| (SlotId(idx), value)))
    }

    // Owner-list links. Only meaningful for occupied slots.

    #[inline]
    pub(crate) fn prev(&self, id: SlotId) -> Option<SlotId> {
        self.slots[id.0].prev
    }

    #[inline]
    pub(crate) fn next(&self, id: SlotId) -> Option<SlotId> {
        self.slots[id.0].next
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, id: SlotId, prev: Option<SlotId>) {
        self.slots[id.0].prev = prev;
    }

    #[inline]
    pub(crate) fn set_next(&mut self, id: SlotId, next: Option<SlotId>) {
        self.slots[id.0].next = next;
    }

    /// Verifies that the free list and the occupied set partition the slots.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let capacity = self.slots.len();
        let mut on_free_list = vec![false; capacity];
        let mut free_count = 0usize;
        let mut current = self.free_head;

        while let Some(id) = current {
            if id.0 >= capacity {
                return Err(InvariantError::new(format!(
                    "free list points outside arena: slot {} of {}",
                    id.0, capacity
                )));
            }
            if on_free_list[id.0] {
                return Err(InvariantError::new(format!("free list cycle at slot {}", id.0)));
            }
            if self.slots[id.0].value.is_some() {
                return Err(InvariantError::new(format!(
                    "occupied slot {} is on the free list",
                    id.0
                )));
            }
            on_free_list[id.0] = true;
            free_count += 1;
            current = self.slots[id.0].next;
        }

        let occupied = self.slots.iter().filter(|slot| slot.value.is_some()).count();
        if occupied != self.len {
            return Err(InvariantError::new(format!(
                "len {} != occupied slot count {}",
                self.len, occupied
            )));
        }
        if occupied + free_count != capacity {
            return Err(InvariantError::new(format!(
                "{} occupied + {} free != capacity {}; a slot is leaked",
                occupied, free_count, capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_until_full_then_reject() {
        let mut arena = SlotArena::with_capacity(2);
        let a = arena.alloc("a").unwrap();
        let b = arena.alloc("b").unwrap();
        assert_ne!(a, b);
        assert!(arena.is_full());
        assert_eq!(arena.alloc("c"), Err("c"));
        assert_eq!(arena.len(), 2);
        arena.check_invariants().unwrap();
    }

    #[test]
    fn free_recycles_most_recent_slot_first() {
        let mut arena = SlotArena::with_capacity(3);
        let a = arena.alloc(1).unwrap();
        let b = arena.alloc(2).unwrap();
        assert_eq!(arena.free(a), Some(1));
        assert_eq!(arena.free(b), Some(2));

        assert_eq!(arena.alloc(3).unwrap(), b);
        assert_eq!(arena.alloc(4).unwrap(), a);
        arena.check_invariants().unwrap();
    }

    #[test]
    fn double_free_is_rejected() {
        let mut arena = SlotArena::with_capacity(1);
        let id = arena.alloc(7).unwrap();
        assert_eq!(arena.free(id), Some(7));
        assert_eq!(arena.free(id), None);
        assert_eq!(arena.free(SlotId(10)), None);
        arena.check_invariants().unwrap();
    }

    #[test]
    fn clear_restores_every_slot() {
        let mut arena = SlotArena::with_capacity(4);
        for i in 0..4 {
            arena.alloc(i).unwrap();
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.iter().count(), 0);
        for i in 0..4 {
            assert!(arena.alloc(i).is_ok());
        }
        arena.check_invariants().unwrap();
    }

    #[test]
    fn zero_capacity_is_config_error() {
        assert!(SlotArena::<u8>::try_with_capacity(0).is_err());
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn zero_capacity_panics() {
        let _ = SlotArena::<u8>::with_capacity(0);
    }

    #[test]
    fn check_invariants_detects_leaked_slot() {
        let mut arena = SlotArena::with_capacity(2);
        arena.alloc(1).unwrap();
        arena.free_head = None;
        assert!(arena.check_invariants().is_err());
    }
}
