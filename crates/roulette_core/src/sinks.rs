//! # Collaborator Interfaces
//!
//! The controller emits requests; front-ends decide what they look, sound
//! and feel like.
//!
//! ```text
//! ┌────────────────────┐   render    ┌────────────────────┐
//! │                    │────────────>│  PresentationSink  │
//! │ RouletteController │   cues      ├────────────────────┤
//! │                    │────────────>│  AudioSink         │
//! │                    │   pulses    ├────────────────────┤
//! │                    │────────────>│  HapticSink        │
//! └────────────────────┘             └────────────────────┘
//! ```
//!
//! Presentation is infallible. Audio, haptic and music requests return a
//! [`SinkResult`]; the caller logs failures through [`report`] and moves on.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{SinkError, SinkResult};
use crate::face::Face;

/// How a final face should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaceStyle {
    /// Any non-jackpot outcome.
    Standard,
    /// The jackpot face.
    Jackpot,
}

impl FaceStyle {
    /// Style for an outcome.
    #[must_use]
    pub fn for_face(face: Face) -> Self {
        if face.is_jackpot() {
            Self::Jackpot
        } else {
            Self::Standard
        }
    }
}

/// A vibration request: one pulse, or alternating on/off durations.
///
/// Index 0 is "on", index 1 "off", and so on, matching the usual platform
/// vibration pattern convention.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<u64>")]
pub struct VibrationPattern {
    steps: Vec<Duration>,
}

impl VibrationPattern {
    /// A single pulse.
    #[must_use]
    pub fn pulse(duration: Duration) -> Self {
        Self {
            steps: vec![duration],
        }
    }

    /// A pattern from millisecond steps.
    #[must_use]
    pub fn from_millis(steps: &[u64]) -> Self {
        Self {
            steps: steps.iter().copied().map(Duration::from_millis).collect(),
        }
    }

    /// Alternating on/off steps.
    #[must_use]
    pub fn steps(&self) -> &[Duration] {
        &self.steps
    }

    /// Time the motor is actually running.
    #[must_use]
    pub fn on_time(&self) -> Duration {
        self.steps.iter().step_by(2).sum()
    }

    /// True when there is nothing to play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(Duration::is_zero)
    }
}

impl From<Vec<u64>> for VibrationPattern {
    fn from(steps: Vec<u64>) -> Self {
        Self::from_millis(&steps)
    }
}

impl fmt::Display for VibrationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .steps
            .iter()
            .map(|d| format!("{}ms", d.as_millis()))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// A background-music track from the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Track {
    /// Stable identifier used for selection.
    pub id: String,
    /// Human-readable name.
    pub title: String,
    /// Where the audio lives (path or URL). Opaque to the core.
    pub source: String,
}

/// Render commands.
pub trait PresentationSink {
    /// Show a preview face while spinning.
    fn show_preview(&mut self, face: Face);

    /// Show the committed face.
    fn show_result(&mut self, face: Face, style: FaceStyle);

    /// Replace the history list. Newest first.
    fn show_history(&mut self, history: &[Face]);

    /// Update the count display for one face.
    fn show_count(&mut self, face: Face, count: u64);

    /// Show the bonus banner.
    fn show_bonus(&mut self, text: &str);

    /// Hide the bonus banner.
    fn hide_bonus(&mut self);

    /// Jackpot celebration (confetti and friends).
    fn celebrate(&mut self, face: Face);
}

/// Sound cues. Fire-and-forget.
pub trait AudioSink {
    /// One-shot cue when a spin starts.
    fn play_start(&mut self) -> SinkResult;

    /// Start the looping spin cue.
    fn start_spin_loop(&mut self) -> SinkResult;

    /// Stop the looping spin cue and rewind it.
    fn stop_spin_loop(&mut self) -> SinkResult;

    /// Result cue for a face.
    fn play_result(&mut self, face: Face) -> SinkResult;
}

/// Vibration output.
pub trait HapticSink {
    /// Play a pattern. Platforms without a motor return
    /// [`SinkError::Unsupported`].
    fn vibrate(&mut self, pattern: &VibrationPattern) -> SinkResult;
}

/// Background music output.
pub trait MusicSink {
    /// Start looping `track`, replacing whatever was playing.
    fn play_track(&mut self, track: &Track) -> SinkResult;

    /// Stop background music.
    fn stop_track(&mut self) -> SinkResult;
}

/// Haptic sink for platforms with no vibration motor.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn vibrate(&mut self, _pattern: &VibrationPattern) -> SinkResult {
        Err(SinkError::Unsupported)
    }
}

/// Everything the controller talks to.
pub struct Sinks {
    /// Render output.
    pub presentation: Box<dyn PresentationSink>,
    /// Sound output.
    pub audio: Box<dyn AudioSink>,
    /// Vibration output.
    pub haptic: Box<dyn HapticSink>,
}

impl Sinks {
    /// Bundles the three collaborators.
    #[must_use]
    pub fn new(
        presentation: impl PresentationSink + 'static,
        audio: impl AudioSink + 'static,
        haptic: impl HapticSink + 'static,
    ) -> Self {
        Self {
            presentation: Box::new(presentation),
            audio: Box::new(audio),
            haptic: Box::new(haptic),
        }
    }
}

impl fmt::Debug for Sinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sinks").finish_non_exhaustive()
    }
}

/// Logs a failed collaborator request and swallows it.
///
/// Missing platform support is expected and only logged at debug level.
pub fn report(what: &str, result: SinkResult) {
    match result {
        Ok(()) => {}
        Err(SinkError::Unsupported) => {
            tracing::debug!("{what}: not supported, skipping");
        }
        Err(err) => {
            tracing::warn!("{what} failed: {err}");
        }
    }
}
