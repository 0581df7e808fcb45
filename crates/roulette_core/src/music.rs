//! # Background Music
//!
//! User-controlled track selection, independent of the spin lifecycle. The
//! latest selection wins immediately, whatever the controller is doing.

use std::fmt;

use crate::error::{RouletteError, RouletteResult};
use crate::sinks::{report, MusicSink, Track};

/// Background music selection over a fixed catalogue.
pub struct MusicSelector {
    tracks: Vec<Track>,
    /// Index of the selected track.
    current: Option<usize>,
    sink: Box<dyn MusicSink>,
}

impl MusicSelector {
    /// Creates a selector with nothing playing.
    #[must_use]
    pub fn new(tracks: Vec<Track>, sink: impl MusicSink + 'static) -> Self {
        Self {
            tracks,
            current: None,
            sink: Box::new(sink),
        }
    }

    /// The catalogue.
    #[must_use]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The selected track, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Track> {
        self.current.map(|i| &self.tracks[i])
    }

    /// Selects a track by id, or silence with `None`.
    ///
    /// Re-selecting the current track is a no-op. Playback failures are
    /// logged; the selection is still recorded.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::UnknownTrack`] for an id outside the
    /// catalogue. The current selection is left untouched.
    pub fn select(&mut self, id: Option<&str>) -> RouletteResult<()> {
        let next = match id {
            Some(id) => Some(
                self.tracks
                    .iter()
                    .position(|t| t.id == id)
                    .ok_or_else(|| RouletteError::UnknownTrack(id.to_owned()))?,
            ),
            None => None,
        };

        if next == self.current {
            return Ok(());
        }

        if self.current.is_some() {
            report("music stop", self.sink.stop_track());
        }
        self.current = next;

        match next {
            Some(index) => {
                let track = &self.tracks[index];
                tracing::info!("Background music: {}", track.title);
                report("music start", self.sink.play_track(track));
            }
            None => tracing::info!("Background music off"),
        }
        Ok(())
    }
}

impl fmt::Debug for MusicSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MusicSelector")
            .field("tracks", &self.tracks.len())
            .field("current", &self.current().map(|t| t.id.as_str()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::recorder::{Recorded, Recorder};

    fn catalogue() -> Vec<Track> {
        ["lofi", "arcade"]
            .iter()
            .map(|id| Track {
                id: (*id).to_owned(),
                title: id.to_uppercase(),
                source: format!("sounds/bgm-{id}.mp3"),
            })
            .collect()
    }

    #[test]
    fn test_switching_tracks() {
        let recorder = Recorder::new();
        let mut music = MusicSelector::new(catalogue(), recorder.clone());

        music.select(Some("lofi")).unwrap();
        music.select(Some("arcade")).unwrap();
        music.select(None).unwrap();

        assert!(music.current().is_none());
        assert_eq!(
            recorder.take(),
            vec![
                Recorded::TrackStarted("lofi".into()),
                Recorded::TrackStopped,
                Recorded::TrackStarted("arcade".into()),
                Recorded::TrackStopped,
            ]
        );
    }

    #[test]
    fn test_reselect_is_noop() {
        let recorder = Recorder::new();
        let mut music = MusicSelector::new(catalogue(), recorder.clone());
        music.select(Some("lofi")).unwrap();
        recorder.clear();

        music.select(Some("lofi")).unwrap();
        music.select(None).unwrap();
        recorder.clear();
        music.select(None).unwrap();
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_unknown_track_keeps_selection() {
        let recorder = Recorder::new();
        let mut music = MusicSelector::new(catalogue(), recorder.clone());
        music.select(Some("arcade")).unwrap();

        let err = music.select(Some("polka")).unwrap_err();
        assert!(matches!(err, RouletteError::UnknownTrack(id) if id == "polka"));
        assert_eq!(music.current().map(|t| t.id.as_str()), Some("arcade"));
    }

    #[test]
    fn test_playback_failure_still_selects() {
        let recorder = Recorder::failing(SinkError::Rejected("autoplay blocked".into()));
        let mut music = MusicSelector::new(catalogue(), recorder);
        music.select(Some("lofi")).unwrap();
        assert_eq!(music.current().map(|t| t.id.as_str()), Some("lofi"));
    }
}
