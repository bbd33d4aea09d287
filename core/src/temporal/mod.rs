//! Temporal mapping between animation frames and trajectory steps
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod mapper;
pub mod mode;

pub use mapper::FrameIndexMapper;
pub use mode::{ModeError, PlaybackMode, Preset, SPLIT_DECIMATION, SPLIT_THRESHOLD};
