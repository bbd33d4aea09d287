//! LAPSE core - optimizer trajectory playback engine
//!
//! Turns step-by-step optimizer logs into immutable trajectories and replays
//! them frame by frame. A playback is assembled once from a validated
//! [`PlaybackRequest`], after which every frame is a pure function of the
//! loaded data and the frame number.
//!
//! ```no_run
//! use lapse_core::{PlaybackRequest, Preset};
//!
//! let request = PlaybackRequest::new("Noisy CG, followed by momentum SGD", Preset::NoisySplit)
//!     .with_series("CG", "cg-sgd_noise.out");
//! let controller = request.prepare()?;
//! for frame in controller.frames() {
//!     println!("{}", frame.label);
//! }
//! # Ok::<(), lapse_core::LapseError>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod error;
pub mod playback;
pub mod request;
pub mod temporal;
pub mod trace;

pub use error::{LapseError, LapseResult};
pub use playback::controller::{
    FrameState, Marker, Phase, PlaybackController, PlaybackLayout, SlotLayout, SlotState,
};
pub use playback::scheduler::{AnimationScheduler, FrameSink, PlaybackSummary, SinkError, StopHandle};
pub use request::{PlaybackRequest, SeriesSource};
pub use temporal::mapper::FrameIndexMapper;
pub use temporal::mode::{PlaybackMode, Preset};
pub use trace::parser::LogParser;
pub use trace::trajectory::{Point, Trajectory, TrajectorySet, MAX_SERIES};

/// Crate version, as recorded by Cargo
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
