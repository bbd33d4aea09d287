//! Optimizer log parsing
//!
//! The log writer emits free-form text interleaved with two record shapes:
//!
//! ```text
//! x0 = -1.2    x1 = 1
//! f = 24.2 +- 0.01
//! ```
//!
//! Position records are exactly six whitespace-separated tokens starting with
//! `x0` and carrying `x1` as the fourth token; value records are exactly five
//! tokens starting with `f`. Every other line is skipped without complaint.
//! A matching line whose numeric token does not parse is a fatal error.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::trace::trajectory::{Point, Trajectory};

/// Log parsing errors
#[derive(Error, Debug)]
pub enum LogParseError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid number for {field} at line {line}: '{value}'")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<LogParseError>,
    },
}

/// Recognized shape of one log line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Record {
    Position(Point),
    Value(f64),
}

/// Parser for step-by-step optimizer logs
pub struct LogParser;

impl LogParser {
    /// Parse a log file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Trajectory, LogParseError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LogParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let trajectory = Self::parse_str(&content).map_err(|e| LogParseError::InFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        debug!(
            "Parsed {}: {} positions, {} values",
            path.display(),
            trajectory.len(),
            trajectory.values().len()
        );
        Ok(trajectory)
    }

    /// Parse a whole log held in memory
    pub fn parse_str(content: &str) -> Result<Trajectory, LogParseError> {
        Self::parse_lines(content.lines())
    }

    /// Parse a sequence of lines; records are kept in encounter order
    pub fn parse_lines<I, S>(lines: I) -> Result<Trajectory, LogParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut points = Vec::new();
        let mut values = Vec::new();

        for (line_num, line) in lines.into_iter().enumerate() {
            match Self::parse_line(line.as_ref(), line_num + 1)? {
                Some(Record::Position(point)) => points.push(point),
                Some(Record::Value(value)) => values.push(value),
                None => {}
            }
        }

        Ok(Trajectory::new(points, values))
    }

    fn parse_line(line: &str, line_num: usize) -> Result<Option<Record>, LogParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["x0", _, x, "x1", _, y] => {
                let x = Self::parse_number(x, "x0", line_num)?;
                let y = Self::parse_number(y, "x1", line_num)?;
                Ok(Some(Record::Position(Point::new(x, y))))
            }
            ["f", _, f, _, _] => {
                let f = Self::parse_number(f, "f", line_num)?;
                Ok(Some(Record::Value(f)))
            }
            _ => Ok(None),
        }
    }

    fn parse_number(token: &str, field: &'static str, line_num: usize) -> Result<f64, LogParseError> {
        token
            .parse::<f64>()
            .map_err(|_| LogParseError::InvalidNumber {
                line: line_num,
                field,
                value: token.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
Initial position:
x0 = -1    x1 = -1
f = 5 +- 0.001

Iteration 1:
x0 = 1.0 x1 = 2.0
f = 3.5
gradient: g0 = 0.3 g1 = 0.4
x0 = 0.5    x1 = -0.25
f = 1.25 +- 0.5
";

    #[test]
    fn test_interleaved_records_kept_in_order() {
        let trajectory = LogParser::parse_str(SAMPLE).unwrap();

        assert_eq!(
            trajectory.points(),
            &[
                Point::new(-1.0, -1.0),
                Point::new(1.0, 2.0),
                Point::new(0.5, -0.25),
            ]
        );
        assert_eq!(trajectory.values().len(), 2);
        assert_relative_eq!(trajectory.values()[0], 5.0);
        assert_relative_eq!(trajectory.values()[1], 1.25);
    }

    #[test]
    fn test_short_value_line_ignored() {
        let trajectory = LogParser::parse_lines(["f = 3.5"]).unwrap();
        assert!(trajectory.values().is_empty());
    }

    #[test]
    fn test_shape_requires_exact_labels() {
        let trajectory = LogParser::parse_lines([
            "x1 = 1.0 x0 = 2.0",
            "x0 = 1.0 y1 = 2.0",
            "g = 1.0 +- 0.1",
            "x0 = 1.0 x1 = 2.0 extra",
        ])
        .unwrap();
        assert!(trajectory.is_empty());
        assert!(trajectory.values().is_empty());
    }

    #[test]
    fn test_scientific_notation_and_signs() {
        let trajectory = LogParser::parse_lines(["x0 = -1.5e-3 x1 = +2E2", "f = 1e-12 +- 0"]).unwrap();
        let point = trajectory.point(0).unwrap();
        assert_relative_eq!(point.x, -1.5e-3);
        assert_relative_eq!(point.y, 200.0);
        assert_relative_eq!(trajectory.value(0).unwrap(), 1e-12);
    }

    #[test]
    fn test_bad_number_in_matching_line_is_fatal() {
        let err = LogParser::parse_lines(["x0 = 1.0 x1 = 2.0", "x0 = 1.0 x1 = two"]).unwrap_err();
        match err {
            LogParseError::InvalidNumber { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, "x1");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = LogParser::parse_lines(["f = nope +- 0.1"]).unwrap_err();
        assert!(matches!(err, LogParseError::InvalidNumber { field: "f", .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{SAMPLE}").unwrap();

        let trajectory = LogParser::load(file.path()).unwrap();
        assert_eq!(trajectory.len(), 3);
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x0 = ? x1 = 0").unwrap();

        let err = LogParser::load(file.path()).unwrap_err();
        assert!(matches!(err, LogParseError::InFile { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));

        let missing = LogParser::load("/nonexistent/lapse/run.out").unwrap_err();
        assert!(matches!(missing, LogParseError::Io { .. }));
    }
}
