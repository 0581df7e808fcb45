//! # Per-Face Tally
//!
//! Monotonic occurrence counters, one per face. The sum of all counters is
//! the number of completed spins.

use crate::face::Face;

/// Occurrence counter for every face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceCounts {
    counts: [u64; Face::COUNT],
}

impl FaceCounts {
    /// Creates a tally with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; Face::COUNT],
        }
    }

    /// Increments the counter for `face` and returns its new value.
    pub fn record(&mut self, face: Face) -> u64 {
        let slot = &mut self.counts[face.index()];
        *slot += 1;
        *slot
    }

    /// Occurrences of `face`.
    #[inline]
    #[must_use]
    pub fn get(&self, face: Face) -> u64 {
        self.counts[face.index()]
    }

    /// Total recorded outcomes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(face, count)` pairs in ascending face order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, u64)> + '_ {
        Face::ALL.iter().map(move |&face| (face, self.get(face)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_total() {
        let mut counts = FaceCounts::new();
        for v in [2, 5, 5, 5, 1, 6] {
            counts.record(Face::new(v).unwrap());
        }

        let expected = [(1, 1), (2, 1), (3, 0), (4, 0), (5, 3), (6, 1)];
        for ((face, count), (value, want)) in counts.iter().zip(expected) {
            assert_eq!(face.value(), value);
            assert_eq!(count, want, "face {value}");
        }
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_record_returns_new_count() {
        let mut counts = FaceCounts::new();
        assert_eq!(counts.record(Face::MAX), 1);
        assert_eq!(counts.record(Face::MAX), 2);
        assert_eq!(counts.get(Face::MIN), 0);
    }
}
