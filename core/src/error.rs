//! Error types for the LAPSE core
//!
//! Every module reports failures through its own `thiserror` enum; this module
//! folds them into [`LapseError`] so callers can propagate with `?` across
//! parsing, validation and playback.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use thiserror::Error;

use crate::playback::scheduler::SinkError;
use crate::request::RequestError;
use crate::temporal::mode::ModeError;
use crate::trace::parser::LogParseError;
use crate::trace::trajectory::TrajectoryError;

/// Result alias used throughout the crate
pub type LapseResult<T> = Result<T, LapseError>;

/// Top-level error for every fallible LAPSE operation
#[derive(Error, Debug)]
pub enum LapseError {
    #[error("log format error: {0}")]
    Parse(#[from] LogParseError),

    #[error("trajectory set error: {0}")]
    Trajectory(#[from] TrajectoryError),

    #[error("playback mode error: {0}")]
    Mode(#[from] ModeError),

    #[error("request error: {0}")]
    Request(#[from] RequestError),

    /// Raised by a frame sink; playback stops at that frame
    #[error("frame sink failed at frame {frame}: {source}")]
    Sink {
        frame: usize,
        #[source]
        source: SinkError,
    },
}

impl LapseError {
    /// Whether the error is a configuration problem rather than bad data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LapseError::Mode(_)
                | LapseError::Request(_)
                | LapseError::Trajectory(TrajectoryError::SeriesOverflow { .. })
                | LapseError::Trajectory(TrajectoryError::NoSeries)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_is_configuration_error() {
        let error = LapseError::from(TrajectoryError::SeriesOverflow {
            requested: 7,
            capacity: 6,
        });
        assert!(error.is_configuration());
        assert_eq!(
            error.to_string(),
            "trajectory set error: 7 series requested but at most 6 can be rendered"
        );
    }

    #[test]
    fn test_parse_error_is_data_error() {
        let error = LapseError::from(LogParseError::InvalidNumber {
            line: 3,
            field: "x1",
            value: "abc".to_string(),
        });
        assert!(!error.is_configuration());
        assert!(error.to_string().contains("line 3"));
    }

    #[test]
    fn test_empty_trajectory_is_data_error() {
        let error = LapseError::from(TrajectoryError::EmptyTrajectory {
            label: "SD".to_string(),
        });
        assert!(!error.is_configuration());
    }
}
