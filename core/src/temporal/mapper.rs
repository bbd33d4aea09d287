//! Frame to step mapping
//!
//! Decouples the number of animation frames from the number of recorded
//! steps. In split playback the frames past the handoff reveal only every
//! `decimation`-th step, so a long noisy tail stays watchable while the steps
//! before the handoff are shown one by one.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::Serialize;

use crate::temporal::mode::{ModeError, PlaybackMode};

/// Translates virtual frame numbers into trajectory indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameIndexMapper {
    /// Number of recorded steps `n`
    len: usize,
    /// `(threshold, decimation)` when the tail is decimated
    split: Option<(usize, usize)>,
    frame_count: usize,
}

impl FrameIndexMapper {
    pub fn new(mode: &PlaybackMode, len: usize) -> Result<Self, ModeError> {
        let split = match mode.split() {
            Some((_, 0)) => return Err(ModeError::ZeroDecimation),
            Some((0, _)) => return Err(ModeError::ZeroThreshold),
            Some((threshold, decimation)) if len > threshold => Some((threshold, decimation)),
            _ => None,
        };

        let frame_count = match split {
            Some((threshold, decimation)) => threshold + (len - threshold) / decimation,
            None => len,
        };

        Ok(Self {
            len,
            split,
            frame_count,
        })
    }

    /// Total number of displayable frames
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn trajectory_len(&self) -> usize {
        self.len
    }

    /// Trajectory index revealed by `frame`, `None` past the last frame
    ///
    /// The returned index is always below the trajectory length.
    pub fn index_of(&self, frame: usize) -> Option<usize> {
        if frame >= self.frame_count {
            return None;
        }
        match self.split {
            Some((threshold, decimation)) if frame > threshold => {
                Some(threshold + decimation * (frame - threshold))
            }
            _ => Some(frame),
        }
    }

    /// Whether `frame` lies past the handoff into the decimated tail
    pub fn is_past_handoff(&self, frame: usize) -> bool {
        matches!(self.split, Some((threshold, _)) if frame > threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn split(threshold: usize, decimation: usize) -> PlaybackMode {
        PlaybackMode::split_decimated(100, threshold, decimation).unwrap()
    }

    #[test]
    fn test_linear_is_identity() {
        let mapper = FrameIndexMapper::new(&PlaybackMode::linear(200), 40).unwrap();
        assert_eq!(mapper.frame_count(), 40);
        assert!((0..40).all(|i| mapper.index_of(i) == Some(i)));
        assert_eq!(mapper.index_of(40), None);
    }

    #[test]
    fn test_split_frame_counts() {
        let counts: Vec<_> = [25, 30, 50]
            .iter()
            .map(|&n| FrameIndexMapper::new(&split(25, 5), n).unwrap().frame_count())
            .collect();
        assert_eq!(counts, vec![25, 26, 30]);
    }

    #[test]
    fn test_split_partial_stride_is_dropped() {
        // 4 steps past the handoff do not fill one stride of 5
        let mapper = FrameIndexMapper::new(&split(25, 5), 29).unwrap();
        assert_eq!(mapper.frame_count(), 25);
        assert_eq!(mapper.index_of(24), Some(24));
        assert_eq!(mapper.index_of(25), None);
    }

    #[test]
    fn test_split_handoff_boundary() {
        let mapper = FrameIndexMapper::new(&split(25, 5), 200).unwrap();
        assert_eq!(mapper.index_of(25), Some(25));
        assert_eq!(mapper.index_of(26), Some(30));
        assert_eq!(mapper.index_of(27), Some(35));
        assert!(!mapper.is_past_handoff(25));
        assert!(mapper.is_past_handoff(26));
    }

    #[test]
    fn test_short_split_behaves_linearly() {
        let mapper = FrameIndexMapper::new(&split(25, 5), 25).unwrap();
        assert_eq!(mapper, FrameIndexMapper::new(&PlaybackMode::linear(100), 25).unwrap());
        assert!(!mapper.is_past_handoff(24));
    }

    #[test]
    fn test_zero_decimation_rejected() {
        let mode = PlaybackMode::SplitDecimated {
            interval_ms: 100,
            threshold: 10,
            decimation: 0,
        };
        assert_eq!(FrameIndexMapper::new(&mode, 50).unwrap_err(), ModeError::ZeroDecimation);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        // Would otherwise yield no frame at all for 3 steps and a stride of 5
        let mode = PlaybackMode::SplitDecimated {
            interval_ms: 100,
            threshold: 0,
            decimation: 5,
        };
        assert_eq!(FrameIndexMapper::new(&mode, 3).unwrap_err(), ModeError::ZeroThreshold);
    }

    proptest! {
        #[test]
        fn prop_indices_stay_in_range_and_increase(
            len in 1usize..2000,
            threshold in 1usize..100,
            decimation in 1usize..20,
        ) {
            let mapper = FrameIndexMapper::new(&split(threshold, decimation), len).unwrap();
            prop_assert!(mapper.frame_count() >= 1);

            let mut previous = None;
            for frame in 0..mapper.frame_count() {
                let index = mapper.index_of(frame).unwrap();
                prop_assert!(index < len);
                if let Some(prev) = previous {
                    prop_assert!(index > prev);
                }
                previous = Some(index);
            }
            prop_assert_eq!(mapper.index_of(mapper.frame_count()), None);
        }
    }
}
