//! Playback requests
//!
//! A request names the log files to replay, their display labels, a title and
//! one of the fixed presets. Everything is validated and loaded eagerly by
//! [`PlaybackRequest::prepare`], so a request either yields a controller ready
//! for playback or fails before the first frame.
//!
//! Request files are JSON:
//!
//! ```json
//! {
//!   "title": "SD/CG variants, no noise",
//!   "preset": 0,
//!   "series": [
//!     { "label": "SD", "path": "cgsd.out" },
//!     { "label": "CG(FR)", "path": "cgfr.out" }
//!   ]
//! }
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::LapseResult;
use crate::playback::controller::PlaybackController;
use crate::playback::scheduler::AnimationScheduler;
use crate::temporal::mode::Preset;
use crate::trace::parser::LogParser;
use crate::trace::trajectory::TrajectorySet;

/// Request validation and loading errors
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("{files} log files but {labels} labels, expected one label per file")]
    LabelMismatch { files: usize, labels: usize },

    #[error("cannot read request {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One log file and the label it is displayed under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSource {
    pub label: String,
    pub path: PathBuf,
}

/// Configuration of one visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackRequest {
    pub title: String,
    pub preset: Preset,
    #[serde(default)]
    pub series: Vec<SeriesSource>,
}

impl PlaybackRequest {
    pub fn new(title: impl Into<String>, preset: Preset) -> Self {
        Self {
            title: title.into(),
            preset,
            series: Vec::new(),
        }
    }

    pub fn with_series(mut self, label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.series.push(SeriesSource {
            label: label.into(),
            path: path.into(),
        });
        self
    }

    /// Build from parallel file and label lists, which must match one to one
    pub fn from_parts(
        title: impl Into<String>,
        preset: Preset,
        files: Vec<PathBuf>,
        labels: Vec<String>,
    ) -> LapseResult<Self> {
        if files.len() != labels.len() {
            return Err(RequestError::LabelMismatch {
                files: files.len(),
                labels: labels.len(),
            }
            .into());
        }

        let series = labels
            .into_iter()
            .zip(files)
            .map(|(label, path)| SeriesSource { label, path })
            .collect();

        Ok(Self {
            title: title.into(),
            preset,
            series,
        })
    }

    pub fn from_json(json: &str) -> LapseResult<Self> {
        Ok(serde_json::from_str(json).map_err(RequestError::from)?)
    }

    /// Read a JSON request; relative log paths resolve against the request's directory
    pub fn from_file<P: AsRef<Path>>(path: P) -> LapseResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| RequestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut request = Self::from_json(&json)?;
        if let Some(base) = path.parent() {
            for source in &mut request.series {
                if source.path.is_relative() {
                    source.path = base.join(&source.path);
                }
            }
        }
        Ok(request)
    }

    /// Check the series count without touching the file system
    pub fn validate(&self) -> LapseResult<()> {
        TrajectorySet::check_capacity(self.series.len())?;
        Ok(())
    }

    /// Parse every log file, in parallel, keeping request order
    pub fn load(&self) -> LapseResult<TrajectorySet> {
        self.validate()?;

        let entries = self
            .series
            .par_iter()
            .map(|source| {
                LogParser::load(&source.path).map(|trajectory| (source.label.clone(), trajectory))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let set = TrajectorySet::new(entries)?;
        info!(
            "Loaded {} series for '{}' ({} steps in the longest run)",
            set.len(),
            self.title,
            set.longest()
        );
        Ok(set)
    }

    /// Validate, load and build the controller for this request
    pub fn prepare(&self) -> LapseResult<PlaybackController> {
        let set = self.load()?;
        PlaybackController::new(self.title.clone(), set, self.preset.mode())
    }

    pub fn scheduler(&self) -> LapseResult<AnimationScheduler> {
        Ok(AnimationScheduler::new(self.prepare()?))
    }
}
