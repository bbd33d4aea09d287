//! LAPSE visualization - presentation side of trajectory playback
//!
//! The core computes frame states; this crate decides how they look and
//! where they go: slot styles, frame sinks and the `lapse` command-line front
//! end.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod logging;
pub mod palette;
pub mod sink;

pub use logging::{init_logger, init_logger_with_level};
pub use palette::{LineStyle, MarkerShape, Palette, SlotAppearance, SlotStyle};
pub use sink::{JsonLinesSink, LogSink, MemorySink};
