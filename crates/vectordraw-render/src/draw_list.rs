//! Recording draw surface for headless output and tests.

use crate::renderer::{DrawSurface, Paint, RenderResult};
use kurbo::{Ellipse, Line, Point, Rect, Shape as KurboShape};
use peniko::Color;
use serde::{Deserialize, Serialize};
use vectordraw_core::palette::ColorValue;

/// Recorded paint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedPaint {
    pub stroke: ColorValue,
    pub fill: ColorValue,
    pub stroke_width: f64,
}

impl From<&Paint> for RecordedPaint {
    fn from(paint: &Paint) -> Self {
        Self {
            stroke: paint.stroke.into(),
            fill: paint.fill.into(),
            stroke_width: paint.stroke_width,
        }
    }
}

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { background: ColorValue },
    Line { p1: Point, p2: Point, style: RecordedPaint },
    Rect { rect: Rect, style: RecordedPaint },
    /// Ellipse recorded by its bounding box.
    Ellipse { bounds: Rect, style: RecordedPaint },
    Polygon { points: Vec<Point>, style: RecordedPaint },
}

/// A [`DrawSurface`] that records every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl DrawSurface for DrawList {
    fn clear(&mut self, background: Color) -> RenderResult<()> {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            background: background.into(),
        });
        Ok(())
    }

    fn draw_line(&mut self, line: Line, paint: &Paint) -> RenderResult<()> {
        self.commands.push(DrawCommand::Line {
            p1: line.p0,
            p2: line.p1,
            style: paint.into(),
        });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) -> RenderResult<()> {
        self.commands.push(DrawCommand::Rect {
            rect,
            style: paint.into(),
        });
        Ok(())
    }

    fn draw_ellipse(&mut self, ellipse: Ellipse, paint: &Paint) -> RenderResult<()> {
        self.commands.push(DrawCommand::Ellipse {
            bounds: ellipse.bounding_box(),
            style: paint.into(),
        });
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[Point], paint: &Paint) -> RenderResult<()> {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            style: paint.into(),
        });
        Ok(())
    }
}
