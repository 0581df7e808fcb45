//! # Roulette Configuration
//!
//! Timing, bookkeeping and feedback settings, loaded once at startup from
//! TOML. Every key is optional; a missing key keeps the default.
//!
//! ```toml
//! history_capacity = 10
//! streak_length = 3
//! seed = 42
//!
//! [timing]
//! preview_interval_ms = 80
//! spin_duration_ms = 2500
//! settle_delay_ms = 2000
//! bonus_banner_ms = 2500
//!
//! [haptics]
//! start = [50]
//! result = [100]
//! jackpot = [100, 30, 100, 30, 200]
//!
//! [[music.tracks]]
//! id = "lofi"
//! title = "Lo-Fi Loop"
//! source = "sounds/bgm-lofi.mp3"
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RouletteError, RouletteResult};
use crate::history::{DEFAULT_HISTORY_CAPACITY, DEFAULT_STREAK_LENGTH};
use crate::sinks::{Track, VibrationPattern};

/// Spin lifecycle durations, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Interval between preview faces while spinning.
    pub preview_interval_ms: u64,
    /// Time from start to result commit.
    pub spin_duration_ms: u64,
    /// Time the result stays up before a new spin is accepted.
    pub settle_delay_ms: u64,
    /// Time the streak banner stays visible.
    pub bonus_banner_ms: u64,
}

impl TimingConfig {
    /// Preview tick interval.
    #[must_use]
    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview_interval_ms)
    }

    /// Spin animation length.
    #[must_use]
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    /// Result display length.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Bonus banner display length.
    #[must_use]
    pub fn bonus_banner(&self) -> Duration {
        Duration::from_millis(self.bonus_banner_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            preview_interval_ms: 80,
            spin_duration_ms: 2500,
            settle_delay_ms: 2000,
            bonus_banner_ms: 2500,
        }
    }
}

/// Vibration patterns for each feedback moment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HapticsConfig {
    /// Light tap on spin start.
    pub start: VibrationPattern,
    /// Ordinary result.
    pub result: VibrationPattern,
    /// Jackpot result.
    pub jackpot: VibrationPattern,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            start: VibrationPattern::from_millis(&[50]),
            result: VibrationPattern::from_millis(&[100]),
            jackpot: VibrationPattern::from_millis(&[100, 30, 100, 30, 200]),
        }
    }
}

/// Background music catalogue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MusicConfig {
    /// Selectable tracks.
    pub tracks: Vec<Track>,
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouletteConfig {
    /// Spin lifecycle durations.
    pub timing: TimingConfig,
    /// Outcomes kept in the history list.
    pub history_capacity: usize,
    /// Equal outcomes in a row that earn the bonus banner.
    pub streak_length: usize,
    /// Vibration patterns.
    pub haptics: HapticsConfig,
    /// Background music catalogue.
    pub music: MusicConfig,
    /// RNG seed for a reproducible session. Entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RouletteConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            streak_length: DEFAULT_STREAK_LENGTH,
            haptics: HapticsConfig::default(),
            music: MusicConfig::default(),
            seed: None,
        }
    }
}

impl RouletteConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::ConfigParse`] for malformed TOML or unknown
    /// keys, and [`RouletteError::InvalidConfig`] when validation fails.
    pub fn from_toml_str(text: &str) -> RouletteResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::ConfigIo`] if the file cannot be read, plus
    /// everything [`Self::from_toml_str`] can return.
    pub fn from_file(path: impl AsRef<Path>) -> RouletteResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RouletteError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`RouletteError::InvalidConfig`] describing the first problem.
    pub fn validate(&self) -> RouletteResult<()> {
        let timing = &self.timing;
        for (name, value) in [
            ("timing.preview_interval_ms", timing.preview_interval_ms),
            ("timing.spin_duration_ms", timing.spin_duration_ms),
            ("timing.settle_delay_ms", timing.settle_delay_ms),
            ("timing.bonus_banner_ms", timing.bonus_banner_ms),
        ] {
            if value == 0 {
                return Err(RouletteError::InvalidConfig(format!("{name} must be > 0")));
            }
        }

        if self.history_capacity == 0 {
            return Err(RouletteError::InvalidConfig(
                "history_capacity must be >= 1".into(),
            ));
        }
        if self.streak_length < 2 {
            return Err(RouletteError::InvalidConfig(
                "streak_length must be >= 2".into(),
            ));
        }
        if self.streak_length > self.history_capacity {
            return Err(RouletteError::InvalidConfig(format!(
                "streak_length {} exceeds history_capacity {}",
                self.streak_length, self.history_capacity
            )));
        }

        let mut seen = HashSet::new();
        for track in &self.music.tracks {
            if track.id.is_empty() {
                return Err(RouletteError::InvalidConfig("music track with empty id".into()));
            }
            if !seen.insert(track.id.as_str()) {
                return Err(RouletteError::InvalidConfig(format!(
                    "duplicate music track id: {}",
                    track.id
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = RouletteConfig::from_toml_str("").unwrap();
        assert_eq!(config, RouletteConfig::default());
        assert_eq!(config.timing.preview_interval(), Duration::from_millis(80));
        assert_eq!(config.timing.spin_duration(), Duration::from_millis(2500));
        assert_eq!(config.timing.settle_delay(), Duration::from_millis(2000));
        assert_eq!(config.history_capacity, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = RouletteConfig::from_toml_str(
            r#"
            seed = 9
            [timing]
            spin_duration_ms = 2000
            settle_delay_ms = 1500

            [haptics]
            jackpot = [200, 50, 200]

            [[music.tracks]]
            id = "lofi"
            title = "Lo-Fi Loop"
            source = "sounds/bgm-lofi.mp3"
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.timing.spin_duration_ms, 2000);
        assert_eq!(config.timing.preview_interval_ms, 80);
        assert_eq!(config.haptics.jackpot, VibrationPattern::from_millis(&[200, 50, 200]));
        assert_eq!(config.haptics.start, VibrationPattern::from_millis(&[50]));
        assert_eq!(config.music.tracks.len(), 1);
        assert_eq!(config.music.tracks[0].id, "lofi");
    }

    #[test]
    fn test_rejects_zero_durations() {
        let err = RouletteConfig::from_toml_str("[timing]\nspin_duration_ms = 0").unwrap_err();
        assert!(matches!(err, RouletteError::InvalidConfig(msg) if msg.contains("spin_duration_ms")));
    }

    #[test]
    fn test_rejects_bad_bookkeeping() {
        assert!(matches!(
            RouletteConfig::from_toml_str("history_capacity = 0"),
            Err(RouletteError::InvalidConfig(_))
        ));
        assert!(matches!(
            RouletteConfig::from_toml_str("streak_length = 1"),
            Err(RouletteError::InvalidConfig(_))
        ));
        assert!(matches!(
            RouletteConfig::from_toml_str("history_capacity = 2\nstreak_length = 3"),
            Err(RouletteError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_tracks() {
        let err = RouletteConfig::from_toml_str(
            r#"
            [[music.tracks]]
            id = "a"
            title = "A"
            source = "a.mp3"
            [[music.tracks]]
            id = "a"
            title = "A again"
            source = "a2.mp3"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_unknown_keys_are_parse_errors() {
        assert!(matches!(
            RouletteConfig::from_toml_str("spin_speed = 3"),
            Err(RouletteError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config =
            RouletteConfig::from_toml_str(include_str!("../../../config/roulette.toml")).unwrap();
        assert_eq!(config.timing, TimingConfig::default());
        assert_eq!(config.haptics, HapticsConfig::default());
        let ids: Vec<_> = config.music.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["lofi", "arcade", "casino"]);
    }

    #[test]
    fn test_missing_file() {
        let err = RouletteConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RouletteError::ConfigIo { .. }));
    }
}
