//! # Roulette Session
//!
//! Owns one controller, its timer queue and the music selector. Front-ends
//! talk to the session only:
//!
//! - input: [`RouletteSession::press_start`], [`RouletteSession::select_music`]
//! - time: [`RouletteSession::advance`] for virtual time, or
//!   [`RouletteSession::next_deadline`] + [`RouletteSession::fire_due`] for a
//!   real-time loop that maps elapsed wall time onto the session timeline.

use std::time::Duration;

use rand_chacha::ChaCha8Rng;

use crate::config::RouletteConfig;
use crate::controller::{RouletteController, RouletteSnapshot, SpinResult};
use crate::dice::{Dice, UniformDice};
use crate::error::RouletteResult;
use crate::music::MusicSelector;
use crate::sinks::{MusicSink, Sinks};
use crate::timer::TimerQueue;

/// A single game session.
#[derive(Debug)]
pub struct RouletteSession<D> {
    controller: RouletteController<D>,
    timers: TimerQueue,
    music: MusicSelector,
}

impl RouletteSession<UniformDice<ChaCha8Rng>> {
    /// Session with uniform dice, seeded from `config.seed` when present.
    #[must_use]
    pub fn from_config(
        config: &RouletteConfig,
        sinks: Sinks,
        music_sink: impl MusicSink + 'static,
    ) -> Self {
        Self::new(
            config,
            UniformDice::from_seed_option(config.seed),
            sinks,
            music_sink,
        )
    }
}

impl<D: Dice> RouletteSession<D> {
    /// Session with explicit dice.
    #[must_use]
    pub fn new(
        config: &RouletteConfig,
        dice: D,
        sinks: Sinks,
        music_sink: impl MusicSink + 'static,
    ) -> Self {
        Self {
            controller: RouletteController::new(config, dice, sinks),
            timers: TimerQueue::new(),
            music: MusicSelector::new(config.music.tracks.clone(), music_sink),
        }
    }

    /// The start trigger. Returns `false` if a spin is already running.
    pub fn press_start(&mut self) -> bool {
        self.controller.start_spin(&mut self.timers)
    }

    /// Changes background music. Allowed at any point of the spin.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RouletteError::UnknownTrack`] for an id outside the
    /// catalogue.
    pub fn select_music(&mut self, track: Option<&str>) -> RouletteResult<()> {
        self.music.select(track)
    }

    /// Fires every timer due at or before `now`, in deadline order.
    ///
    /// Returns the spins committed along the way.
    pub fn fire_due(&mut self, now: Duration) -> Vec<SpinResult> {
        let mut results = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            tracing::debug!("Timer {:?} fired at {:?}", fired.kind, fired.at);
            results.extend(self.controller.on_timer(fired.kind, &mut self.timers));
        }
        self.timers.advance_to(now);
        results
    }

    /// Moves the session clock forward by `by`, firing whatever comes due.
    pub fn advance(&mut self, by: Duration) -> Vec<SpinResult> {
        let until = self.timers.now() + by;
        self.fire_due(until)
    }

    /// Starts a spin and runs virtual time until the controller is idle.
    ///
    /// Returns `None` if the spin could not start.
    pub fn spin_to_completion(&mut self) -> Option<SpinResult> {
        if !self.press_start() {
            return None;
        }
        let mut result = None;
        while !self.controller.is_idle() {
            let Some(fired) = self.timers.pop_due(Duration::MAX) else {
                break;
            };
            if let Some(committed) = self.controller.on_timer(fired.kind, &mut self.timers) {
                result = Some(committed);
            }
        }
        result
    }

    /// Deadline of the next timer on the session clock.
    #[must_use]
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Session clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// The controller.
    #[must_use]
    pub fn controller(&self) -> &RouletteController<D> {
        &self.controller
    }

    /// The timer queue.
    #[must_use]
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// The music selector.
    #[must_use]
    pub fn music(&self) -> &MusicSelector {
        &self.music
    }

    /// Copies the controller's bookkeeping out.
    #[must_use]
    pub fn snapshot(&self) -> RouletteSnapshot {
        self.controller.snapshot()
    }
}
