//! Test doubles: a canvas that records calls and a host that hands them out.

use std::collections::HashSet;

use trigon_engine::canvas::Canvas2d;
use trigon_engine::paint::Color;

use crate::host::{SurfaceError, SurfaceHost};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    LineWidth(f32),
    StrokeStyle(Color),
    FillStyle(Color),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc { cx: f32, cy: f32, r: f32, start: f32, end: f32 },
    ClosePath,
    Stroke,
    Fill,
    ClearRect(f32, f32, f32, f32),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Canvas2d for RecordingCanvas {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn set_line_width(&mut self, width: f32) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_stroke_style(&mut self, color: Color) {
        self.ops.push(Op::StrokeStyle(color));
    }
    fn set_fill_style(&mut self, color: Color) {
        self.ops.push(Op::FillStyle(color));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        self.ops.push(Op::Arc { cx, cy, r: radius, start, end });
    }
    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(Op::ClearRect(x, y, width, height));
    }
}

/// Hands out [`RecordingCanvas`]es for any selector not marked missing.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub missing: HashSet<String>,
}

impl RecordingHost {
    pub fn without(selector: &str) -> Self {
        Self { missing: HashSet::from([selector.to_string()]) }
    }
}

impl SurfaceHost for RecordingHost {
    type Surface = RecordingCanvas;

    fn acquire(&mut self, selector: &str) -> Result<RecordingCanvas, SurfaceError> {
        if self.missing.contains(selector) {
            return Err(SurfaceError::Unavailable { selector: selector.to_string() });
        }
        Ok(RecordingCanvas::new(200.0, 100.0))
    }
}
