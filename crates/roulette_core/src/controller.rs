//! # Roulette Controller
//!
//! The spin state machine.
//!
//! ```text
//!            start_spin()                Complete timer
//!   ┌──────┐ ───────────> ┌──────────┐ ─────────────────> ┌───────────────┐
//!   │ Idle │              │ Spinning │                    │ ResultDisplay │
//!   └──────┘ <─────────────────────────────────────────── └───────────────┘
//!                              Settle timer
//! ```
//!
//! While spinning, a repeating `PreviewTick` shows throwaway faces. The tick
//! is cancelled before the outcome is rolled, so no preview can overwrite
//! the result. `start_spin` outside `Idle` does nothing at all.
//!
//! ## Bookkeeping
//!
//! On commit the outcome is pushed onto [`History`], tallied in
//! [`FaceCounts`], and the newest entries are checked for a streak. A streak
//! is re-reported on every qualifying push, so four equal faces in a row
//! raise the banner twice.

use std::fmt;

use crate::config::{HapticsConfig, RouletteConfig, TimingConfig};
use crate::dice::Dice;
use crate::face::Face;
use crate::history::History;
use crate::sinks::{report, FaceStyle, Sinks};
use crate::tally::FaceCounts;
use crate::timer::{Scheduler, TimerId, TimerKind};

/// Where the controller is in the spin lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpinState {
    /// Waiting for a start trigger.
    #[default]
    Idle,
    /// Preview faces are cycling; the outcome is not rolled yet.
    Spinning,
    /// The outcome is on screen; start is still locked.
    ResultDisplay,
}

impl fmt::Display for SpinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Spinning => "spinning",
            Self::ResultDisplay => "result",
        };
        f.write_str(name)
    }
}

/// What a completed spin produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinResult {
    /// The committed face.
    pub outcome: Face,
    /// True when the outcome is the jackpot face.
    pub jackpot: bool,
    /// Repeated face if this commit completed a streak.
    pub streak: Option<Face>,
}

/// Point-in-time copy of the controller's bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouletteSnapshot {
    /// Lifecycle state.
    pub state: SpinState,
    /// Outcomes, newest first.
    pub history: Vec<Face>,
    /// Per-face occurrences.
    pub counts: FaceCounts,
    /// Spins committed this session.
    pub completed_spins: u64,
}

/// Text of the streak banner.
#[must_use]
pub fn bonus_text(face: Face, length: usize) -> String {
    match length {
        3 => format!("🎉 Triple {face}! 🎉"),
        n => format!("🎉 {face} x{n} in a row! 🎉"),
    }
}

/// Owns the spin lifecycle and its bookkeeping.
pub struct RouletteController<D> {
    /// Lifecycle state.
    state: SpinState,
    /// Face source.
    dice: D,
    /// Recent outcomes.
    history: History,
    /// Per-face tally.
    counts: FaceCounts,
    /// Equal outcomes needed for a streak.
    streak_length: usize,
    /// Lifecycle durations.
    timing: TimingConfig,
    /// Vibration patterns.
    haptics: HapticsConfig,
    /// Collaborators.
    sinks: Sinks,
    /// Armed preview tick, while spinning.
    preview_timer: Option<TimerId>,
    /// Armed banner hide timer, while the banner is up.
    bonus_timer: Option<TimerId>,
}

impl<D: Dice> RouletteController<D> {
    /// Creates an idle controller with empty history and zero counts.
    #[must_use]
    pub fn new(config: &RouletteConfig, dice: D, sinks: Sinks) -> Self {
        Self {
            state: SpinState::Idle,
            dice,
            history: History::new(config.history_capacity),
            counts: FaceCounts::new(),
            streak_length: config.streak_length,
            timing: config.timing.clone(),
            haptics: config.haptics.clone(),
            sinks,
            preview_timer: None,
            bonus_timer: None,
        }
    }

    /// Current lifecycle state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> SpinState {
        self.state
    }

    /// True when a new spin would be accepted.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == SpinState::Idle
    }

    /// Recent outcomes.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Per-face tally.
    #[must_use]
    pub fn counts(&self) -> &FaceCounts {
        &self.counts
    }

    /// Spins committed this session.
    #[must_use]
    pub fn completed_spins(&self) -> u64 {
        self.counts.total()
    }

    /// Copies the bookkeeping out.
    #[must_use]
    pub fn snapshot(&self) -> RouletteSnapshot {
        RouletteSnapshot {
            state: self.state,
            history: self.history.to_vec(),
            counts: self.counts,
            completed_spins: self.completed_spins(),
        }
    }

    /// Starts a spin.
    ///
    /// Only acts when idle. Returns `false`, with no side effects and no
    /// timers armed, if a spin is already in progress.
    pub fn start_spin<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.state != SpinState::Idle {
            tracing::debug!("Start ignored while {}", self.state);
            return false;
        }
        self.state = SpinState::Spinning;
        tracing::info!("Spin started");

        report("start cue", self.sinks.audio.play_start());
        report("spin loop", self.sinks.audio.start_spin_loop());
        report("start vibration", self.sinks.haptic.vibrate(&self.haptics.start));

        self.preview_timer = Some(
            scheduler.schedule_repeating(self.timing.preview_interval(), TimerKind::PreviewTick),
        );
        scheduler.schedule_once(self.timing.spin_duration(), TimerKind::Complete);
        true
    }

    /// Commits the outcome of the current spin.
    ///
    /// Normally driven by the `Complete` timer. Returns `None` if no spin is
    /// in progress.
    pub fn complete_spin<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Option<SpinResult> {
        if self.state != SpinState::Spinning {
            tracing::debug!("Completion ignored while {}", self.state);
            return None;
        }

        // The preview tick must be gone before the outcome exists.
        if let Some(id) = self.preview_timer.take() {
            scheduler.cancel(id);
        }
        report("spin loop stop", self.sinks.audio.stop_spin_loop());

        let outcome = self.dice.roll();
        self.state = SpinState::ResultDisplay;

        let jackpot = outcome.is_jackpot();
        self.sinks
            .presentation
            .show_result(outcome, FaceStyle::for_face(outcome));
        report("result cue", self.sinks.audio.play_result(outcome));

        if jackpot {
            report("jackpot vibration", self.sinks.haptic.vibrate(&self.haptics.jackpot));
            self.sinks.presentation.celebrate(outcome);
        } else {
            report("result vibration", self.sinks.haptic.vibrate(&self.haptics.result));
        }

        self.history.push(outcome);
        self.sinks.presentation.show_history(&self.history.to_vec());
        let streak = self.history.streak(self.streak_length);
        if let Some(face) = streak {
            self.raise_bonus(face, scheduler);
        }

        let count = self.counts.record(outcome);
        self.sinks.presentation.show_count(outcome, count);

        tracing::info!(
            "Spin #{} landed on {}{}",
            self.counts.total(),
            outcome,
            if jackpot { " (JACKPOT)" } else { "" }
        );

        scheduler.schedule_once(self.timing.settle_delay(), TimerKind::Settle);

        Some(SpinResult {
            outcome,
            jackpot,
            streak,
        })
    }

    /// Ends result display and re-enables start.
    ///
    /// Returns `false` if there was no result on display.
    pub fn settle(&mut self) -> bool {
        if self.state != SpinState::ResultDisplay {
            tracing::debug!("Settle ignored while {}", self.state);
            return false;
        }
        self.state = SpinState::Idle;
        tracing::debug!("Ready for next spin");
        true
    }

    /// Routes a fired timer to its transition.
    ///
    /// Returns the spin result when the timer committed one.
    pub fn on_timer<S: Scheduler + ?Sized>(
        &mut self,
        kind: TimerKind,
        scheduler: &mut S,
    ) -> Option<SpinResult> {
        match kind {
            TimerKind::PreviewTick => {
                if self.state == SpinState::Spinning {
                    let face = self.dice.preview();
                    self.sinks.presentation.show_preview(face);
                } else {
                    tracing::debug!("Stray preview tick while {}", self.state);
                }
                None
            }
            TimerKind::Complete => self.complete_spin(scheduler),
            TimerKind::Settle => {
                self.settle();
                None
            }
            TimerKind::HideBonus => {
                self.bonus_timer = None;
                self.sinks.presentation.hide_bonus();
                None
            }
        }
    }

    fn raise_bonus<S: Scheduler + ?Sized>(&mut self, face: Face, scheduler: &mut S) {
        tracing::info!("Streak bonus: {} x{}", face, self.streak_length);
        self.sinks
            .presentation
            .show_bonus(&bonus_text(face, self.streak_length));

        // A new streak restarts the banner's clock.
        if let Some(id) = self.bonus_timer.take() {
            scheduler.cancel(id);
        }
        self.bonus_timer =
            Some(scheduler.schedule_once(self.timing.bonus_banner(), TimerKind::HideBonus));
    }
}

impl<D> fmt::Debug for RouletteController<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouletteController")
            .field("state", &self.state)
            .field("history", &self.history)
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}
