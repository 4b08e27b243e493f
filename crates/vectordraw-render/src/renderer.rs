//! Renderer trait abstraction.

use kurbo::{Ellipse, Line, Point, Rect};
use peniko::Color;
use thiserror::Error;
use vectordraw_core::scene::SceneModel;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Stroke and fill for a single primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub stroke: Color,
    pub fill: Color,
    pub stroke_width: f64,
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a SceneModel,
    /// Background color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Outline the selected shape's bounds.
    pub highlight_selection: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a SceneModel) -> Self {
        Self {
            scene,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(30, 144, 255, 255), // DodgerBlue
            highlight_selection: true,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    /// Enable or disable the selection outline.
    pub fn with_selection_highlight(mut self, enabled: bool) -> Self {
        self.highlight_selection = enabled;
        self
    }
}

/// Primitive draw calls offered by a 2D backend.
pub trait DrawSurface {
    /// Start a new frame filled with `background`.
    fn clear(&mut self, background: Color) -> RenderResult<()>;

    fn draw_line(&mut self, line: Line, paint: &Paint) -> RenderResult<()>;

    fn draw_rect(&mut self, rect: Rect, paint: &Paint) -> RenderResult<()>;

    /// Draw an ellipse inscribed in its bounding box.
    fn draw_ellipse(&mut self, ellipse: Ellipse, paint: &Paint) -> RenderResult<()>;

    /// Draw a closed polygon through `points`.
    fn draw_polygon(&mut self, points: &[Point], paint: &Paint) -> RenderResult<()>;
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the draw calls for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
