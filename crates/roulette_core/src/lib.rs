//! # Dice Roulette Core
//!
//! The spin/result state machine behind the dice roulette game, with no
//! terminal, audio backend or wall clock attached.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                          RouletteSession                           │
//! ├────────────────────────────────────────────────────────────────────┤
//! │  press_start ──> RouletteController ──> Sinks (render/audio/haptic)│
//! │                        │   ^                                       │
//! │               schedule │   │ fired TimerKind                       │
//! │                        v   │                                       │
//! │                     TimerQueue (virtual time)                      │
//! │                                                                    │
//! │  select_music ──> MusicSelector ──> MusicSink                      │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use roulette_core::{Recorder, RouletteConfig, RouletteSession};
//! use std::time::Duration;
//!
//! let recorder = Recorder::new();
//! let mut session = RouletteSession::from_config(
//!     &RouletteConfig::default(),
//!     recorder.sinks(),
//!     recorder.clone(),
//! );
//! session.press_start();
//! let results = session.advance(Duration::from_millis(2500));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod dice;
pub mod error;
pub mod face;
pub mod history;
pub mod music;
pub mod recorder;
pub mod session;
pub mod sinks;
pub mod tally;
pub mod timer;

pub use config::{HapticsConfig, MusicConfig, RouletteConfig, TimingConfig};
pub use controller::{bonus_text, RouletteController, RouletteSnapshot, SpinResult, SpinState};
pub use dice::{Dice, ScriptThen, ScriptedDice, UniformDice};
pub use error::{RouletteError, RouletteResult, SinkError, SinkResult};
pub use face::Face;
pub use history::History;
pub use music::MusicSelector;
pub use recorder::{Recorded, Recorder};
pub use session::RouletteSession;
pub use sinks::{
    AudioSink, FaceStyle, HapticSink, MusicSink, NoHaptics, PresentationSink, Sinks, Track,
    VibrationPattern,
};
pub use tally::FaceCounts;
pub use timer::{FiredTimer, Scheduler, TimerId, TimerKind, TimerQueue};
