//! Paced delivery of frames to a presentation sink
//!
//! The scheduler is the only component deciding when the next frame is
//! computed. Frames `0..frame_count` are rendered once each, in order, on a
//! single task; the run ends after the last frame or as soon as a stop is
//! requested through a [`StopHandle`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use tokio::time::{self, MissedTickBehavior};

use crate::error::{LapseError, LapseResult};
use crate::playback::controller::{FrameState, PlaybackController, PlaybackLayout};

/// Shortest pacing period accepted by the timer
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Failure reported by a frame sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Rejected(String),
}

/// Consumer of rendered frames
///
/// `begin` is called once before the first frame with the slot layout,
/// `render` once per frame in order, and `finish` after the last rendered
/// frame, including after an early stop.
pub trait FrameSink {
    fn begin(&mut self, _layout: &PlaybackLayout) -> Result<(), SinkError> {
        Ok(())
    }

    fn render(&mut self, frame: &FrameState) -> Result<(), SinkError>;

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn begin(&mut self, layout: &PlaybackLayout) -> Result<(), SinkError> {
        (**self).begin(layout)
    }

    fn render(&mut self, frame: &FrameState) -> Result<(), SinkError> {
        (**self).render(frame)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Cloneable request to stop scheduling further frames
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of one playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackSummary {
    pub frames_rendered: usize,
    pub frame_count: usize,
    pub stopped_early: bool,
}

/// Drives a [`PlaybackController`] from the first to the last frame
#[derive(Debug)]
pub struct AnimationScheduler {
    controller: PlaybackController,
    stop: StopHandle,
}

impl AnimationScheduler {
    pub fn new(controller: PlaybackController) -> Self {
        Self {
            controller,
            stop: StopHandle::new(),
        }
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Render every frame at the interval of the playback mode
    pub async fn run<S: FrameSink>(&self, mut sink: S) -> LapseResult<PlaybackSummary> {
        let interval = self.controller.mode().interval().max(MIN_INTERVAL);
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.begin(&mut sink, interval)?;
        let mut rendered = 0;
        for frame in 0..self.controller.frame_count() {
            if self.stop.is_stopped() {
                break;
            }
            ticker.tick().await;
            if self.stop.is_stopped() {
                break;
            }
            self.render(&mut sink, frame)?;
            rendered += 1;
        }
        self.finish(&mut sink, rendered)
    }

    /// Render every frame immediately, ignoring the pacing interval
    pub fn run_unpaced<S: FrameSink>(&self, mut sink: S) -> LapseResult<PlaybackSummary> {
        self.begin(&mut sink, Duration::ZERO)?;
        let mut rendered = 0;
        for frame in 0..self.controller.frame_count() {
            if self.stop.is_stopped() {
                break;
            }
            self.render(&mut sink, frame)?;
            rendered += 1;
        }
        self.finish(&mut sink, rendered)
    }

    fn begin<S: FrameSink>(&self, sink: &mut S, interval: Duration) -> LapseResult<()> {
        info!(
            "Playing '{}': {} frames every {:?}",
            self.controller.title(),
            self.controller.frame_count(),
            interval
        );
        sink.begin(&self.controller.layout())
            .map_err(|source| LapseError::Sink { frame: 0, source })
    }

    fn render<S: FrameSink>(&self, sink: &mut S, frame: usize) -> LapseResult<()> {
        let Some(state) = self.controller.frame(frame) else {
            return Ok(());
        };
        debug!("frame {} -> {}", frame, state.label);
        sink.render(&state)
            .map_err(|source| LapseError::Sink { frame, source })
    }

    fn finish<S: FrameSink>(&self, sink: &mut S, rendered: usize) -> LapseResult<PlaybackSummary> {
        sink.finish()
            .map_err(|source| LapseError::Sink { frame: rendered, source })?;

        let summary = PlaybackSummary {
            frames_rendered: rendered,
            frame_count: self.controller.frame_count(),
            stopped_early: rendered < self.controller.frame_count(),
        };
        info!(
            "Finished '{}': {}/{} frames{}",
            self.controller.title(),
            summary.frames_rendered,
            summary.frame_count,
            if summary.stopped_early { " (stopped early)" } else { "" }
        );
        Ok(summary)
    }
}
