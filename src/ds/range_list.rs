//! Double-ended list with Redis-style push/pop/range commands.
//!
//! Backed by a `VecDeque`, so pushes and pops at either end are O(1) and
//! `lrange` is O(k) in the number of returned items.
//!
//! `lrange` takes inclusive `start` / `stop` indices that may be negative,
//! counting from the tail (`-1` is the last item). Out-of-range bounds are
//! clamped; an empty window yields an empty vector rather than an error.
//!
//! ```
//! use boundkit::ds::RangeList;
//!
//! let mut list = RangeList::new();
//! list.rpush("b");
//! list.rpush("c");
//! list.lpush("a");
//!
//! assert_eq!(list.lrange(0, -1), vec!["a", "b", "c"]);
//! assert_eq!(list.lrange(-2, 10), vec!["b", "c"]);
//! assert_eq!(list.rpop_n(2), vec!["b", "c"]);
//! ```

use std::collections::VecDeque;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeList<T> {
    items: VecDeque<T>,
}

impl<T> RangeList<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Pushes at the head; returns the new length.
    pub fn lpush(&mut self, value: T) -> usize {
        self.items.push_front(value);
        self.items.len()
    }

    /// Pushes at the tail; returns the new length.
    pub fn rpush(&mut self, value: T) -> usize {
        self.items.push_back(value);
        self.items.len()
    }

    pub fn lpop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    pub fn rpop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Removes up to `count` items from the head, in list order.
    pub fn lpop_n(&mut self, count: usize) -> Vec<T> {
        let count = count.min(self.items.len());
        self.items.drain(..count).collect()
    }

    /// Removes up to `count` items from the tail, in list order.
    pub fn rpop_n(&mut self, count: usize) -> Vec<T> {
        let count = count.min(self.items.len());
        let start = self.items.len() - count;
        self.items.drain(start..).collect()
    }

    /// Clones the items in the inclusive window `[start, stop]`.
    pub fn lrange(&self, start: isize, stop: isize) -> Vec<T>
    where
        T: Clone,
    {
        match normalize_range(start, stop, self.items.len()) {
            Some((first, last)) => self.items.range(first..=last).cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn llen(&self) -> usize {
        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates head to tail.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> From<Vec<T>> for RangeList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RangeList<T> {
    type Item = &'a T;
    type IntoIter = std::collections::vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Resolves Redis-style inclusive bounds against `len`.
///
/// Negative indices count from the end. Returns `None` when the window is
/// empty after clamping.
pub fn normalize_range(start: isize, stop: isize, len: usize) -> Option<(usize, usize)> {
    let len = isize::try_from(len).ok()?;
    let start = if start < 0 { len + start } else { start };
    let stop = if stop < 0 { len + stop } else { stop };

    if start > stop || start >= len || stop < 0 {
        return None;
    }
    let start = start.max(0);
    let stop = stop.min(len - 1);
    Some((start as usize, stop as usize))
}
