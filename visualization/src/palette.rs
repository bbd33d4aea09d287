//! Slot styles
//!
//! Maps the style index of every rendering slot onto a concrete color and
//! marker shape. There are exactly as many styles as renderable series, so
//! every series is visually distinct. In split playback both phases of a
//! series keep its style and differ by line: solid up to the handoff, dashed
//! after it.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use lapse_core::{Phase, SlotLayout, MAX_SERIES};
use serde::Serialize;

/// Marker shape drawn at a slot's current position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Cross,
    Square,
    Diamond,
    Star,
    Plus,
}

impl MarkerShape {
    /// Single-character glyph, as understood by most plotting front ends
    pub fn glyph(self) -> char {
        match self {
            MarkerShape::Circle => 'o',
            MarkerShape::Cross => 'x',
            MarkerShape::Square => 's',
            MarkerShape::Diamond => 'd',
            MarkerShape::Star => '*',
            MarkerShape::Plus => '+',
        }
    }
}

/// Line drawn along a slot's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Full | Phase::PreHandoff => LineStyle::Solid,
            Phase::PostHandoff => LineStyle::Dashed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
        }
    }
}

/// Color and marker of one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotStyle {
    pub name: &'static str,
    /// RGBA
    pub color: [f32; 4],
    pub marker: MarkerShape,
}

/// Series style plus the line of the slot's phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotAppearance {
    #[serde(flatten)]
    pub style: SlotStyle,
    pub line: LineStyle,
}

/// Fixed table of [`MAX_SERIES`] styles
#[derive(Debug, Clone)]
pub struct Palette {
    styles: [SlotStyle; MAX_SERIES],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: [
                SlotStyle { name: "white", color: [1.0, 1.0, 1.0, 1.0], marker: MarkerShape::Circle },
                SlotStyle { name: "purple", color: [0.5, 0.0, 0.5, 1.0], marker: MarkerShape::Cross },
                SlotStyle { name: "pink", color: [1.0, 0.75, 0.8, 1.0], marker: MarkerShape::Square },
                SlotStyle { name: "black", color: [0.0, 0.0, 0.0, 1.0], marker: MarkerShape::Diamond },
                SlotStyle { name: "lime", color: [0.0, 1.0, 0.0, 1.0], marker: MarkerShape::Star },
                SlotStyle { name: "red", color: [1.0, 0.0, 0.0, 1.0], marker: MarkerShape::Plus },
            ],
        }
    }
}

impl Palette {
    /// `None` for an index outside the table
    pub fn style(&self, index: usize) -> Option<&SlotStyle> {
        self.styles.get(index)
    }

    pub fn style_for(&self, slot: &SlotLayout) -> Option<SlotAppearance> {
        self.style(slot.style).map(|style| SlotAppearance {
            style: style.clone(),
            line: LineStyle::for_phase(slot.phase),
        })
    }
}
