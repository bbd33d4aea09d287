//! Playback modes and the fixed presets they are selected from
//!
//! A [`PlaybackMode`] decides both the pacing interval and whether the
//! timeline is shown linearly or split into a full-fidelity phase followed by
//! a decimated tail. The four [`Preset`]s are the configurations offered to
//! callers; split parameters are constants of the split preset.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Handoff step of the split preset
pub const SPLIT_THRESHOLD: usize = 31;

/// Stride applied past the handoff by the split preset
pub const SPLIT_DECIMATION: usize = 5;

/// Playback mode errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("unknown preset '{0}', expected 0-3 or one of cg, sgd, noisy-split, noisy-adam")]
    UnknownPreset(String),

    #[error("decimation factor must be at least 1")]
    ZeroDecimation,

    #[error("split threshold must be at least 1")]
    ZeroThreshold,
}

/// How frames map onto trajectory steps, and how fast they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackMode {
    /// One frame per recorded step
    Linear { interval_ms: u64 },

    /// Every step up to `threshold`, then every `decimation`-th step
    SplitDecimated {
        interval_ms: u64,
        threshold: usize,
        decimation: usize,
    },
}

impl PlaybackMode {
    pub fn linear(interval_ms: u64) -> Self {
        PlaybackMode::Linear { interval_ms }
    }

    pub fn split_decimated(
        interval_ms: u64,
        threshold: usize,
        decimation: usize,
    ) -> Result<Self, ModeError> {
        if decimation == 0 {
            return Err(ModeError::ZeroDecimation);
        }
        if threshold == 0 {
            return Err(ModeError::ZeroThreshold);
        }
        Ok(PlaybackMode::SplitDecimated {
            interval_ms,
            threshold,
            decimation,
        })
    }

    /// Pacing between two consecutive frames
    pub fn interval(&self) -> Duration {
        match *self {
            PlaybackMode::Linear { interval_ms }
            | PlaybackMode::SplitDecimated { interval_ms, .. } => Duration::from_millis(interval_ms),
        }
    }

    /// `(threshold, decimation)` for split playback
    pub fn split(&self) -> Option<(usize, usize)> {
        match *self {
            PlaybackMode::Linear { .. } => None,
            PlaybackMode::SplitDecimated {
                threshold,
                decimation,
                ..
            } => Some((threshold, decimation)),
        }
    }

    /// Rendering slots occupied by each series
    pub fn phases(&self) -> usize {
        match self {
            PlaybackMode::Linear { .. } => 1,
            PlaybackMode::SplitDecimated { .. } => 2,
        }
    }
}

/// The fixed playback configurations, selected by `0..=3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Preset {
    /// Noiseless line-search methods: few steps, shown slowly
    ConjugateGradient,
    /// Noiseless stochastic-gradient family: many steps, shown fast
    StochasticGradient,
    /// Noisy run handing off to a second method at [`SPLIT_THRESHOLD`]
    NoisySplit,
    /// Noisy adaptive-moment methods
    NoisyAdaptive,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::ConjugateGradient,
        Preset::StochasticGradient,
        Preset::NoisySplit,
        Preset::NoisyAdaptive,
    ];

    pub fn selector(self) -> u8 {
        match self {
            Preset::ConjugateGradient => 0,
            Preset::StochasticGradient => 1,
            Preset::NoisySplit => 2,
            Preset::NoisyAdaptive => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::ConjugateGradient => "cg",
            Preset::StochasticGradient => "sgd",
            Preset::NoisySplit => "noisy-split",
            Preset::NoisyAdaptive => "noisy-adam",
        }
    }

    pub fn mode(self) -> PlaybackMode {
        match self {
            Preset::ConjugateGradient => PlaybackMode::linear(200),
            Preset::StochasticGradient => PlaybackMode::linear(5),
            Preset::NoisySplit => PlaybackMode::SplitDecimated {
                interval_ms: 100,
                threshold: SPLIT_THRESHOLD,
                decimation: SPLIT_DECIMATION,
            },
            Preset::NoisyAdaptive => PlaybackMode::linear(15),
        }
    }
}

impl TryFrom<u8> for Preset {
    type Error = ModeError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        Preset::ALL
            .into_iter()
            .find(|p| p.selector() == selector)
            .ok_or_else(|| ModeError::UnknownPreset(selector.to_string()))
    }
}

impl From<Preset> for u8 {
    fn from(preset: Preset) -> Self {
        preset.selector()
    }
}

impl FromStr for Preset {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(selector) = s.parse::<u8>() {
            return Preset::try_from(selector);
        }
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModeError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.selector(), self.name())
    }
}
