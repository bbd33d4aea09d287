//! Per-frame visible state of every rendering slot
//!
//! Each series owns one slot in linear playback and two in split playback:
//! the pre-handoff phase and the post-handoff phase. The controller keeps no
//! state between frames; [`PlaybackController::frame`] recomputes everything
//! from the immutable trajectories, so frames can be produced in any order
//! and repeated calls give identical output.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{info, warn};
use serde::Serialize;

use crate::error::LapseResult;
use crate::temporal::mapper::FrameIndexMapper;
use crate::temporal::mode::PlaybackMode;
use crate::trace::trajectory::{Point, Series, TrajectorySet};

/// Portion of a series' timeline a slot renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The whole run, linear playback
    Full,
    /// Steps up to the handoff
    PreHandoff,
    /// Decimated steps from the handoff on
    PostHandoff,
}

/// Static description of one rendering slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotLayout {
    pub slot: usize,
    /// Index of the owning series in the trajectory set
    pub series: usize,
    pub phase: Phase,
    pub label: String,
    /// Style index of the owning series, in `0..MAX_SERIES`
    ///
    /// Both phases of a split series share it; `phase` tells them apart.
    pub style: usize,
}

/// Everything a presentation layer needs before the first frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackLayout {
    pub title: String,
    pub mode: PlaybackMode,
    pub frame_count: usize,
    pub slots: Vec<SlotLayout>,
}

/// Current-position marker of a slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub point: Point,
    /// Trajectory index the marker sits on
    pub step: usize,
    /// Objective value logged for that step, when one was recorded
    pub value: Option<f64>,
}

/// Visible state of one slot in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotState {
    pub slot: usize,
    pub path: Vec<Point>,
    /// `None` while the slot is not active yet
    pub marker: Option<Marker>,
}

/// Visible state of every slot in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameState {
    pub frame: usize,
    /// Trajectory index revealed by this frame
    pub step: usize,
    /// Human readable step counter, `step = N`
    pub label: String,
    pub slots: Vec<SlotState>,
}

/// Computes frame states for a validated trajectory set
#[derive(Debug, Clone)]
pub struct PlaybackController {
    title: String,
    mode: PlaybackMode,
    trajectories: TrajectorySet,
    mapper: FrameIndexMapper,
    slots: Vec<SlotLayout>,
}

impl PlaybackController {
    pub fn new(
        title: impl Into<String>,
        trajectories: TrajectorySet,
        mode: PlaybackMode,
    ) -> LapseResult<Self> {
        TrajectorySet::check_capacity(trajectories.len())?;
        let mapper = FrameIndexMapper::new(&mode, trajectories.longest())?;
        let slots = Self::assign_slots(&trajectories, &mode);
        let title = title.into();

        if !trajectories.is_uniform() {
            warn!(
                "'{}': series lengths differ, shorter runs stay parked at their last point",
                title
            );
        }
        info!(
            "'{}': {} series, {} slots, {} frames from {} steps",
            title,
            trajectories.len(),
            slots.len(),
            mapper.frame_count(),
            mapper.trajectory_len()
        );

        Ok(Self {
            title,
            mode,
            trajectories,
            mapper,
            slots,
        })
    }

    fn assign_slots(trajectories: &TrajectorySet, mode: &PlaybackMode) -> Vec<SlotLayout> {
        let mut slots = Vec::with_capacity(trajectories.len() * mode.phases());

        for (index, series) in trajectories.iter().enumerate() {
            match mode.split() {
                None => slots.push(SlotLayout {
                    slot: slots.len(),
                    series: index,
                    phase: Phase::Full,
                    label: series.label.clone(),
                    style: index,
                }),
                Some((threshold, _)) => {
                    slots.push(SlotLayout {
                        slot: slots.len(),
                        series: index,
                        phase: Phase::PreHandoff,
                        label: series.label.clone(),
                        style: index,
                    });
                    slots.push(SlotLayout {
                        slot: slots.len(),
                        series: index,
                        phase: Phase::PostHandoff,
                        label: format!("{} (from step {})", series.label, threshold),
                        style: index,
                    });
                }
            }
        }

        slots
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mode(&self) -> &PlaybackMode {
        &self.mode
    }

    pub fn trajectories(&self) -> &TrajectorySet {
        &self.trajectories
    }

    pub fn mapper(&self) -> &FrameIndexMapper {
        &self.mapper
    }

    pub fn frame_count(&self) -> usize {
        self.mapper.frame_count()
    }

    pub fn slots(&self) -> &[SlotLayout] {
        &self.slots
    }

    pub fn layout(&self) -> PlaybackLayout {
        PlaybackLayout {
            title: self.title.clone(),
            mode: self.mode,
            frame_count: self.frame_count(),
            slots: self.slots.clone(),
        }
    }

    /// Visible state for `frame`, `None` past the last frame
    pub fn frame(&self, frame: usize) -> Option<FrameState> {
        let step = self.mapper.index_of(frame)?;

        let mut slots = Vec::with_capacity(self.slots.len());
        for series in self.trajectories.iter() {
            self.series_state(series, frame, step, &mut slots);
        }
        for (slot, state) in slots.iter_mut().enumerate() {
            state.slot = slot;
        }

        Some(FrameState {
            frame,
            step,
            label: format!("step = {step}"),
            slots,
        })
    }

    /// All frames in playback order
    pub fn frames(&self) -> impl Iterator<Item = FrameState> + '_ {
        (0..self.frame_count()).filter_map(move |frame| self.frame(frame))
    }

    fn series_state(&self, series: &Series, frame: usize, step: usize, out: &mut Vec<SlotState>) {
        let trajectory = &series.trajectory;
        let (Some(start), Some(last)) = (trajectory.first(), trajectory.last_index()) else {
            return;
        };
        let cursor = step.min(last);

        let marker_at = |index: usize| {
            trajectory.point(index).map(|point| Marker {
                point,
                step: index,
                value: trajectory.value(index),
            })
        };
        let pinned = || vec![start, start];
        let slot = |path: Vec<Point>, marker: Option<Marker>| SlotState {
            slot: 0,
            path,
            marker,
        };

        match self.mode.split() {
            None if frame == 0 => out.push(slot(pinned(), marker_at(0))),
            None => out.push(slot(trajectory.span(0, cursor).to_vec(), marker_at(cursor))),
            Some((threshold, _)) => {
                let handoff = threshold.min(last);
                if frame == 0 {
                    out.push(slot(pinned(), marker_at(0)));
                    out.push(slot(pinned(), None));
                } else if !self.mapper.is_past_handoff(frame) {
                    out.push(slot(trajectory.span(0, cursor).to_vec(), marker_at(cursor)));
                    out.push(slot(pinned(), None));
                } else {
                    out.push(slot(trajectory.span(0, handoff).to_vec(), marker_at(handoff)));
                    out.push(slot(
                        trajectory.span(handoff, cursor).to_vec(),
                        marker_at(cursor),
                    ));
                }
            }
        }
    }
}
