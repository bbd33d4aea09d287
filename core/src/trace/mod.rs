//! Trace ingestion: optimizer log parsing and the trajectories it produces
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod parser;
pub mod trajectory;

pub use parser::{LogParseError, LogParser};
pub use trajectory::{Point, Series, Trajectory, TrajectoryError, TrajectorySet, MAX_SERIES};
