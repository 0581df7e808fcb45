//! # Dice
//!
//! Source of faces for the controller. Production sessions use
//! [`UniformDice`]; tests and demos replay fixed outcomes with
//! [`ScriptedDice`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::face::Face;

/// Produces die faces.
pub trait Dice {
    /// Rolls the committed outcome of a spin.
    fn roll(&mut self) -> Face;

    /// Rolls a throwaway preview face shown while spinning.
    ///
    /// Defaults to [`Self::roll`].
    fn preview(&mut self) -> Face {
        self.roll()
    }
}

/// Uniform i.i.d. faces from any RNG.
#[derive(Clone, Debug)]
pub struct UniformDice<R> {
    rng: R,
}

impl<R: Rng> UniformDice<R> {
    /// Wraps an RNG.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformDice<ChaCha8Rng> {
    /// Seeded dice: the same seed replays the same session.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Dice seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }

    /// Seeded when `seed` is set, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> Dice for UniformDice<R> {
    fn roll(&mut self) -> Face {
        self.rng.gen()
    }
}

/// Replays a fixed list of outcomes.
///
/// Preview faces cycle through 1..=6 and never consume the script. Once the
/// script runs out, outcomes fall back to `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<Face>,
    fallback: Face,
    preview: Face,
}

impl ScriptedDice {
    /// Dice that return `outcomes` in order.
    #[must_use]
    pub fn new(outcomes: impl IntoIterator<Item = Face>) -> Self {
        Self {
            script: outcomes.into_iter().collect(),
            fallback: Face::MIN,
            preview: Face::MAX,
        }
    }

    /// Outcome used once the script is exhausted.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Face) -> Self {
        self.fallback = fallback;
        self
    }

    /// Outcomes not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Replays the script, then hands every roll to `rest`.
    #[must_use]
    pub fn then<D: Dice>(self, rest: D) -> ScriptThen<D> {
        ScriptThen { script: self, rest }
    }
}

/// A script followed by other dice, for demos that keep going after the
/// scripted outcomes run out.
#[derive(Clone, Debug)]
pub struct ScriptThen<D> {
    script: ScriptedDice,
    rest: D,
}

impl<D: Dice> Dice for ScriptThen<D> {
    fn roll(&mut self) -> Face {
        if self.script.remaining() > 0 {
            self.script.roll()
        } else {
            self.rest.roll()
        }
    }

    fn preview(&mut self) -> Face {
        self.rest.preview()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> Face {
        self.script.pop_front().unwrap_or(self.fallback)
    }

    fn preview(&mut self) -> Face {
        let next = (self.preview.index() + 1) % Face::COUNT;
        self.preview = Face::ALL[next];
        self.preview
    }
}

impl<D: Dice + ?Sized> Dice for Box<D> {
    fn roll(&mut self) -> Face {
        (**self).roll()
    }

    fn preview(&mut self) -> Face {
        (**self).preview()
    }
}
