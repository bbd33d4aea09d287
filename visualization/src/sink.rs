//! Frame sinks for the presentation side of a playback
//!
//! - [`JsonLinesSink`] exports the layout followed by one JSON object per frame
//! - [`LogSink`] narrates the playback through the `log` facade
//! - [`MemorySink`] keeps every frame for later inspection
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::io::Write;

use lapse_core::{FrameSink, FrameState, PlaybackLayout, SinkError};
use log::info;
use serde::Serialize;

use crate::palette::{Palette, SlotAppearance};

fn appearances(palette: &Palette, layout: &PlaybackLayout) -> Result<Vec<SlotAppearance>, SinkError> {
    layout
        .slots
        .iter()
        .map(|slot| {
            palette.style_for(slot).ok_or_else(|| {
                SinkError::Rejected(format!("no style {} for slot '{}'", slot.style, slot.label))
            })
        })
        .collect()
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum Record<'a> {
    Layout {
        #[serde(flatten)]
        layout: &'a PlaybackLayout,
        styles: Vec<SlotAppearance>,
    },
    Frame(&'a FrameState),
}

/// Writes newline-delimited JSON: a `layout` record, then one `frame` record per frame
pub struct JsonLinesSink<W: Write> {
    writer: W,
    palette: Palette,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            palette: Palette::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, layout: &PlaybackLayout) -> Result<(), SinkError> {
        let styles = appearances(&self.palette, layout)?;
        self.write_record(&Record::Layout { layout, styles })
    }

    fn render(&mut self, frame: &FrameState) -> Result<(), SinkError> {
        self.write_record(&Record::Frame(frame))
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Logs the legend once and every frame's markers at `info` level
#[derive(Default)]
pub struct LogSink {
    palette: Palette,
    labels: Vec<String>,
}

impl FrameSink for LogSink {
    fn begin(&mut self, layout: &PlaybackLayout) -> Result<(), SinkError> {
        info!("{} ({} frames)", layout.title, layout.frame_count);
        self.labels.clear();
        for (slot, look) in layout.slots.iter().zip(appearances(&self.palette, layout)?) {
            info!(
                "  {} {} {} {}",
                look.style.marker.glyph(),
                look.style.name,
                look.line.name(),
                slot.label
            );
            self.labels.push(slot.label.clone());
        }
        Ok(())
    }

    fn render(&mut self, frame: &FrameState) -> Result<(), SinkError> {
        let markers: Vec<String> = frame
            .slots
            .iter()
            .filter_map(|state| {
                let marker = state.marker?;
                let label = self.labels.get(state.slot).map(String::as_str).unwrap_or("?");
                Some(match marker.value {
                    Some(f) => format!("{label}: ({:.4}, {:.4}) f={f:.4}", marker.point.x, marker.point.y),
                    None => format!("{label}: ({:.4}, {:.4})", marker.point.x, marker.point.y),
                })
            })
            .collect();
        info!("{} | {}", frame.label, markers.join(" | "));
        Ok(())
    }
}

/// Collects frames in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub layout: Option<PlaybackLayout>,
    pub frames: Vec<FrameState>,
    pub finished: bool,
}

impl FrameSink for MemorySink {
    fn begin(&mut self, layout: &PlaybackLayout) -> Result<(), SinkError> {
        self.layout = Some(layout.clone());
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn render(&mut self, frame: &FrameState) -> Result<(), SinkError> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapse_core::{
        AnimationScheduler, PlaybackController, PlaybackMode, Point, Trajectory, TrajectorySet,
    };

    fn scheduler(mode: PlaybackMode) -> AnimationScheduler {
        let points = (0..40).map(|i| Point::new(i as f64 * 0.5, 1.0)).collect();
        let values = (0..40).map(|i| 100.0 - i as f64).collect();
        let set = TrajectorySet::new(vec![
            ("Adam", Trajectory::new(points, values)),
            ("FIRE", Trajectory::new(vec![Point::new(0.0, 0.0)], Vec::new())),
        ])
        .unwrap();
        AnimationScheduler::new(PlaybackController::new("sinks", set, mode).unwrap())
    }

    #[test]
    fn test_json_lines_one_record_per_frame() {
        let scheduler = scheduler(PlaybackMode::linear(15));
        let mut sink = JsonLinesSink::new(Vec::new());
        scheduler.run_unpaced(&mut sink).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 41);
        assert_eq!(lines[0]["record"], "layout");
        assert_eq!(lines[0]["title"], "sinks");
        assert_eq!(lines[0]["mode"]["kind"], "linear");
        assert_eq!(lines[0]["styles"][1]["name"], "purple");
        assert_eq!(lines[1]["record"], "frame");
        assert_eq!(lines[40]["label"], "step = 39");
        assert_eq!(lines[40]["slots"][0]["marker"]["value"], 61.0);
        assert!(lines[40]["slots"][1]["marker"]["value"].is_null());
    }

    #[test]
    fn test_memory_sink_collects_split_frames() {
        let scheduler = scheduler(PlaybackMode::split_decimated(100, 10, 3).unwrap());
        let mut sink = MemorySink::default();
        let summary = scheduler.run_unpaced(&mut sink).unwrap();

        // 10 frames before the handoff, then (40 - 10) / 3
        assert_eq!(summary.frame_count, 20);
        assert_eq!(sink.frames.len(), 20);
        assert!(sink.finished);
        assert_eq!(sink.layout.unwrap().slots.len(), 4);
    }

    #[test]
    fn test_json_layout_marks_post_handoff_dashed() {
        let scheduler = scheduler(PlaybackMode::split_decimated(100, 10, 3).unwrap());
        let mut sink = JsonLinesSink::new(Vec::new());
        scheduler.run_unpaced(&mut sink).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let layout: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        let styles: Vec<_> = layout["styles"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| (s["name"].as_str().unwrap(), s["line"].as_str().unwrap()))
            .collect();
        assert_eq!(
            styles,
            vec![
                ("white", "solid"),
                ("white", "dashed"),
                ("purple", "solid"),
                ("purple", "dashed"),
            ]
        );
    }

    #[test]
    fn test_unknown_style_rejected_by_sink() {
        let scheduler = scheduler(PlaybackMode::linear(15));
        let mut layout = scheduler.controller().layout();
        layout.slots[1].style = 9;

        let err = JsonLinesSink::new(Vec::new()).begin(&layout).unwrap_err();
        assert!(matches!(err, SinkError::Rejected(_)));
    }

    #[test]
    fn test_log_sink_accepts_every_frame() {
        let scheduler = scheduler(PlaybackMode::linear(200));
        let summary = scheduler.run_unpaced(LogSink::default()).unwrap();
        assert_eq!(summary.frames_rendered, 40);
    }
}
