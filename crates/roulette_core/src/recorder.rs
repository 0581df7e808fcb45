//! # Recording Sinks
//!
//! In-memory collaborators for tests, benchmarks and headless runs. Every
//! request lands in a shared log that the test inspects afterwards.
//!
//! ```rust,ignore
//! let recorder = Recorder::new();
//! let controller = RouletteController::new(&config, dice, recorder.sinks());
//! // ... drive the controller ...
//! assert!(recorder.take().contains(&Recorded::Celebrate(6)));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{SinkError, SinkResult};
use crate::face::Face;
use crate::sinks::{
    AudioSink, FaceStyle, HapticSink, MusicSink, PresentationSink, Sinks, Track, VibrationPattern,
};

/// One recorded collaborator request. Faces are stored as raw values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    /// `show_preview`.
    Preview(u8),
    /// `show_result`.
    Result(u8, FaceStyle),
    /// `show_history`, newest first.
    History(Vec<u8>),
    /// `show_count`.
    Count(u8, u64),
    /// `show_bonus`.
    Bonus(String),
    /// `hide_bonus`.
    BonusHidden,
    /// `celebrate`.
    Celebrate(u8),
    /// `play_start`.
    StartCue,
    /// `start_spin_loop`.
    SpinLoopStarted,
    /// `stop_spin_loop`.
    SpinLoopStopped,
    /// `play_result`.
    ResultCue(u8),
    /// `vibrate`, in milliseconds.
    Vibrate(Vec<u64>),
    /// `play_track`, by id.
    TrackStarted(String),
    /// `stop_track`.
    TrackStopped,
}

impl Recorded {
    /// True for preview frames, which tests usually filter out.
    #[must_use]
    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview(_))
    }
}

/// Shared request log implementing every sink trait.
///
/// Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    log: Arc<Mutex<Vec<Recorded>>>,
    /// Returned by every fallible request after it is recorded.
    failure: Option<SinkError>,
}

impl Recorder {
    /// A recorder whose fallible requests all succeed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose audio, haptic and music requests all fail with
    /// `failure`.
    #[must_use]
    pub fn failing(failure: SinkError) -> Self {
        Self {
            log: Arc::default(),
            failure: Some(failure),
        }
    }

    /// Controller sinks backed by this log.
    #[must_use]
    pub fn sinks(&self) -> Sinks {
        Sinks::new(self.clone(), self.clone(), self.clone())
    }

    /// Drains the log.
    #[must_use]
    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.log.lock())
    }

    /// Empties the log.
    pub fn clear(&self) {
        self.log.lock().clear();
    }

    /// Copies the log without draining it.
    #[must_use]
    pub fn entries(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    /// Log entries that are not preview frames.
    #[must_use]
    pub fn without_previews(&self) -> Vec<Recorded> {
        self.log
            .lock()
            .iter()
            .filter(|r| !r.is_preview())
            .cloned()
            .collect()
    }

    fn push(&self, entry: Recorded) {
        self.log.lock().push(entry);
    }

    fn outcome(&self, entry: Recorded) -> SinkResult {
        self.push(entry);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl PresentationSink for Recorder {
    fn show_preview(&mut self, face: Face) {
        self.push(Recorded::Preview(face.value()));
    }

    fn show_result(&mut self, face: Face, style: FaceStyle) {
        self.push(Recorded::Result(face.value(), style));
    }

    fn show_history(&mut self, history: &[Face]) {
        self.push(Recorded::History(history.iter().map(|f| f.value()).collect()));
    }

    fn show_count(&mut self, face: Face, count: u64) {
        self.push(Recorded::Count(face.value(), count));
    }

    fn show_bonus(&mut self, text: &str) {
        self.push(Recorded::Bonus(text.to_owned()));
    }

    fn hide_bonus(&mut self) {
        self.push(Recorded::BonusHidden);
    }

    fn celebrate(&mut self, face: Face) {
        self.push(Recorded::Celebrate(face.value()));
    }
}

impl AudioSink for Recorder {
    fn play_start(&mut self) -> SinkResult {
        self.outcome(Recorded::StartCue)
    }

    fn start_spin_loop(&mut self) -> SinkResult {
        self.outcome(Recorded::SpinLoopStarted)
    }

    fn stop_spin_loop(&mut self) -> SinkResult {
        self.outcome(Recorded::SpinLoopStopped)
    }

    fn play_result(&mut self, face: Face) -> SinkResult {
        self.outcome(Recorded::ResultCue(face.value()))
    }
}

impl HapticSink for Recorder {
    fn vibrate(&mut self, pattern: &VibrationPattern) -> SinkResult {
        let steps = pattern
            .steps()
            .iter()
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .collect();
        self.outcome(Recorded::Vibrate(steps))
    }
}

impl MusicSink for Recorder {
    fn play_track(&mut self, track: &Track) -> SinkResult {
        self.outcome(Recorded::TrackStarted(track.id.clone()))
    }

    fn stop_track(&mut self) -> SinkResult {
        self.outcome(Recorded::TrackStopped)
    }
}
