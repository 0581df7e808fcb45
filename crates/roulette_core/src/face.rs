//! # Die Faces
//!
//! [`Face`] is a six-sided die value. Out-of-range faces cannot be
//! constructed, so History and FaceCounts never have to re-check bounds.

use std::fmt;

use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::error::{RouletteError, RouletteResult};

/// A single die face, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Face(u8);

impl Face {
    /// Number of faces on the die.
    pub const COUNT: usize = 6;

    /// Lowest face.
    pub const MIN: Self = Self(1);

    /// Highest face. Rolling it is the jackpot.
    pub const MAX: Self = Self(6);

    /// The jackpot face.
    pub const JACKPOT: Self = Self::MAX;

    /// All faces in ascending order.
    pub const ALL: [Self; Self::COUNT] = [Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Creates a face from a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::InvalidFace`] when `value` is not in `1..=6`.
    pub fn new(value: u8) -> RouletteResult<Self> {
        if (1..=6).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RouletteError::InvalidFace(value))
        }
    }

    /// Raw value in `1..=6`.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Zero-based index, for per-face tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// True for the jackpot face.
    #[inline]
    #[must_use]
    pub const fn is_jackpot(self) -> bool {
        self.0 == Self::JACKPOT.0
    }
}

impl TryFrom<u8> for Face {
    type Error = RouletteError;

    fn try_from(value: u8) -> RouletteResult<Self> {
        Self::new(value)
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> Self {
        face.0
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniform over all six faces.
impl Distribution<Face> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Face {
        Face(rng.gen_range(1..=6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_face_bounds() {
        assert!(Face::new(0).is_err());
        assert!(Face::new(7).is_err());
        for v in 1..=6 {
            assert_eq!(Face::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn test_only_six_is_jackpot() {
        let jackpots: Vec<_> = Face::ALL.iter().filter(|f| f.is_jackpot()).collect();
        assert_eq!(jackpots, vec![&Face::MAX]);
    }

    #[test]
    fn test_sampling_covers_every_face() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [0u32; Face::COUNT];
        for _ in 0..6000 {
            let face: Face = rng.gen();
            seen[face.index()] += 1;
        }
        // Each face should land near 1000; allow generous slack.
        for (i, count) in seen.iter().enumerate() {
            assert!(
                (800..1200).contains(count),
                "face {} drawn {count} times out of 6000",
                i + 1
            );
        }
    }
}
