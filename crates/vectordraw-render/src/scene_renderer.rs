//! Translates scene state into primitive draw calls.

use crate::renderer::{DrawSurface, Paint, RenderContext, RenderResult, Renderer};
use kurbo::{Ellipse, Line};
use peniko::Color;
use vectordraw_core::shapes::{Geometry, Shape};

/// Width of the selection outline.
const SELECTION_STROKE_WIDTH: f64 = 1.0;

/// Renders a scene onto any [`DrawSurface`].
#[derive(Debug, Default)]
pub struct SceneRenderer<S> {
    surface: S,
}

impl<S: DrawSurface> SceneRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn render_shape(&mut self, shape: &Shape) -> RenderResult<()> {
        let paint = Paint {
            stroke: shape.style.stroke_color.into(),
            fill: shape.style.fill_color.into(),
            stroke_width: shape.style.stroke_width,
        };
        match shape.geometry() {
            Geometry::Line { p1, p2 } => self.surface.draw_line(Line::new(p1, p2), &paint),
            Geometry::Rectangle(bbox) => self.surface.draw_rect(bbox.as_rect(), &paint),
            Geometry::Ellipse(bbox) => self
                .surface
                .draw_ellipse(Ellipse::from_rect(bbox.as_rect()), &paint),
            Geometry::Triangle(tri) => self.surface.draw_polygon(&tri.vertices(), &paint),
        }
    }
}

impl<S: DrawSurface> Renderer for SceneRenderer<S> {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let background = self.background_color(ctx);
        self.surface.clear(background)?;

        for shape in ctx.scene.render_order() {
            self.render_shape(shape)?;
        }

        if ctx.highlight_selection {
            if let Some(selected) = ctx.scene.selected() {
                let paint = Paint {
                    stroke: ctx.selection_color,
                    fill: Color::TRANSPARENT,
                    stroke_width: SELECTION_STROKE_WIDTH,
                };
                self.surface.draw_rect(selected.bounds().as_rect(), &paint)?;
            }
        }
        log::trace!("built scene with {} shapes", ctx.scene.len());
        Ok(())
    }
}
