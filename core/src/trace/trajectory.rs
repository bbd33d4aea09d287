//! Trajectories and the ordered set of series displayed together
//!
//! A [`Trajectory`] is created once by the parser and never mutated again.
//! A [`TrajectorySet`] pairs each trajectory with its display label; the
//! position of an entry in the set is its style slot, so insertion order is
//! preserved exactly.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of series that can be rendered side by side
pub const MAX_SERIES: usize = 6;

/// Trajectory set validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("{requested} series requested but at most {capacity} can be rendered")]
    SeriesOverflow { requested: usize, capacity: usize },

    #[error("at least one series is required")]
    NoSeries,

    #[error("series '{label}' contains no position records")]
    EmptyTrajectory { label: String },
}

/// Position in the two-dimensional parameter space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered path and scalar-value history of one optimization run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    /// Positions in file order
    points: Vec<Point>,
    /// Objective values in file order, index-aligned with `points` per step
    values: Vec<f64>,
}

impl Trajectory {
    pub fn new(points: Vec<Point>, values: Vec<f64>) -> Self {
        Self { points, values }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of position records; this is the trajectory length used for playback
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Index of the last position record
    pub fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    /// Position prefix `[start..=end]`, clamped to the recorded range
    pub fn span(&self, start: usize, end: usize) -> &[Point] {
        match self.last_index() {
            Some(last) => {
                let end = end.min(last);
                let start = start.min(end);
                &self.points[start..=end]
            }
            None => &[],
        }
    }
}

/// One labeled trajectory of a [`TrajectorySet`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub trajectory: Trajectory,
}

/// Ordered, validated collection of the series shown in one playback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectorySet {
    series: Vec<Series>,
}

impl TrajectorySet {
    /// Assemble a set, enforcing the 1..=[`MAX_SERIES`] capacity and non-empty trajectories
    pub fn new<L: Into<String>>(entries: Vec<(L, Trajectory)>) -> Result<Self, TrajectoryError> {
        Self::check_capacity(entries.len())?;

        let mut series = Vec::with_capacity(entries.len());
        for (label, trajectory) in entries {
            let label = label.into();
            if trajectory.is_empty() {
                return Err(TrajectoryError::EmptyTrajectory { label });
            }
            series.push(Series { label, trajectory });
        }

        Ok(Self { series })
    }

    /// Validate a requested series count before any data is loaded
    pub fn check_capacity(requested: usize) -> Result<(), TrajectoryError> {
        if requested == 0 {
            return Err(TrajectoryError::NoSeries);
        }
        if requested > MAX_SERIES {
            return Err(TrajectoryError::SeriesOverflow {
                requested,
                capacity: MAX_SERIES,
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    /// Length of the longest trajectory; playback runs until it is exhausted
    pub fn longest(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.trajectory.len())
            .max()
            .unwrap_or(0)
    }

    /// Whether all trajectories have the same number of position records
    pub fn is_uniform(&self) -> bool {
        let mut lengths = self.series.iter().map(|s| s.trajectory.len());
        match lengths.next() {
            Some(first) => lengths.all(|len| len == first),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Trajectory {
        let points = (0..n).map(|i| Point::new(i as f64, -(i as f64))).collect();
        let values = (0..n).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        Trajectory::new(points, values)
    }

    #[test]
    fn test_set_preserves_input_order() {
        let set = TrajectorySet::new(vec![
            ("SD", line(3)),
            ("CG(FR)", line(4)),
            ("CG(PR)", line(2)),
        ])
        .unwrap();

        let labels: Vec<_> = set.labels().collect();
        assert_eq!(labels, vec!["SD", "CG(FR)", "CG(PR)"]);
        assert_eq!(set.longest(), 4);
        assert!(!set.is_uniform());
    }

    #[test]
    fn test_six_series_accepted_seven_rejected() {
        let six: Vec<_> = (0..6).map(|i| (format!("s{i}"), line(2))).collect();
        assert_eq!(TrajectorySet::new(six).unwrap().len(), 6);

        let seven: Vec<_> = (0..7).map(|i| (format!("s{i}"), line(2))).collect();
        assert_eq!(
            TrajectorySet::new(seven).unwrap_err(),
            TrajectoryError::SeriesOverflow {
                requested: 7,
                capacity: MAX_SERIES
            }
        );
    }

    #[test]
    fn test_empty_set_and_empty_trajectory_rejected() {
        let none: Vec<(String, Trajectory)> = Vec::new();
        assert_eq!(TrajectorySet::new(none).unwrap_err(), TrajectoryError::NoSeries);

        let err = TrajectorySet::new(vec![("Adam", line(2)), ("FIRE", Trajectory::default())])
            .unwrap_err();
        assert_eq!(
            err,
            TrajectoryError::EmptyTrajectory {
                label: "FIRE".to_string()
            }
        );
    }

    #[test]
    fn test_span_clamps_to_recorded_range() {
        let trajectory = line(5);
        assert_eq!(trajectory.span(0, 2).len(), 3);
        assert_eq!(trajectory.span(3, 10).len(), 2);
        assert_eq!(trajectory.span(7, 10), &[Point::new(4.0, -4.0)]);
        assert!(Trajectory::default().span(0, 3).is_empty());
    }

    #[test]
    fn test_value_lookup_is_independent_of_points() {
        let trajectory = Trajectory::new(vec![Point::new(0.0, 0.0)], vec![2.0, 1.0]);
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.value(1), Some(1.0));
        assert_eq!(trajectory.point(1), None);
    }
}
