//! Frame-driven playback of a trajectory set
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod controller;
pub mod scheduler;

pub use controller::{
    FrameState, Marker, Phase, PlaybackController, PlaybackLayout, SlotLayout, SlotState,
};
pub use scheduler::{AnimationScheduler, FrameSink, PlaybackSummary, SinkError, StopHandle};
