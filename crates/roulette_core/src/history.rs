//! # Rolling History
//!
//! Most-recent-first list of committed outcomes, bounded to a fixed
//! capacity. Pushing past capacity evicts the oldest entry.
//!
//! Streak detection is a pure read of the newest entries and is evaluated
//! by the controller after every push, so a run of four equal faces reports
//! a streak twice (once at the third, once at the fourth).

use std::collections::VecDeque;

use crate::face::Face;

/// Default number of outcomes kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Default number of equal outcomes that make a streak.
pub const DEFAULT_STREAK_LENGTH: usize = 3;

/// Bounded, most-recent-first outcome history.
#[derive(Clone, Debug)]
pub struct History {
    /// Front is the newest entry.
    entries: VecDeque<Face>,
    /// Maximum retained entries.
    capacity: usize,
}

impl History {
    /// Creates an empty history.
    ///
    /// A capacity of zero is raised to one; config validation rejects it
    /// before it gets here.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Prepends an outcome, evicting the oldest past capacity.
    ///
    /// Returns the evicted face, if any.
    pub fn push(&mut self, face: Face) -> Option<Face> {
        self.entries.push_front(face);
        if self.entries.len() > self.capacity {
            self.entries.pop_back()
        } else {
            None
        }
    }

    /// The most recent outcome.
    #[must_use]
    pub fn latest(&self) -> Option<Face> {
        self.entries.front().copied()
    }

    /// Iterates newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = Face> + '_ {
        self.entries.iter().copied()
    }

    /// Copies the entries out, newest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Face> {
        self.iter().collect()
    }

    /// Number of retained outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first commit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum retained outcomes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the repeated face if the `length` newest entries are equal.
    ///
    /// Needs at least `length` entries. Lengths below 2 never match.
    #[must_use]
    pub fn streak(&self, length: usize) -> Option<Face> {
        if length < 2 || self.entries.len() < length {
            return None;
        }
        let head = self.entries[0];
        self.entries
            .iter()
            .take(length)
            .all(|&f| f == head)
            .then_some(head)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
