//! # Roulette Error Types
//!
//! Two families live here:
//!
//! - [`RouletteError`]: domain and configuration errors surfaced to callers.
//! - [`SinkError`]: cosmetic collaborator failures (audio, haptics, music).
//!   These are caught where the request is made, logged, and dropped. They
//!   never reach the state machine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or driving a roulette session.
#[derive(Error, Debug)]
pub enum RouletteError {
    /// A raw value outside 1..=6 was offered as a die face.
    #[error("invalid die face: {0} (expected 1..=6)")]
    InvalidFace(u8),

    /// Configuration parsed but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::RouletteConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Background music selection named a track that is not in the catalogue.
    #[error("unknown music track: {0}")]
    UnknownTrack(String),
}

/// Result type for roulette operations.
pub type RouletteResult<T> = Result<T, RouletteError>;

/// Failure reported by a presentation-side collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The platform has no such capability (no vibration motor, no audio).
    #[error("not supported on this platform")]
    Unsupported,

    /// The platform refused the request (autoplay policy, permissions).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The backing resource is missing or failed to load.
    #[error("resource unavailable: {0}")]
    Unavailable(String),
}

/// Result type for collaborator requests.
pub type SinkResult = Result<(), SinkError>;
