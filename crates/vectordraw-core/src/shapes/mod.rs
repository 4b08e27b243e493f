//! Shape definitions for the canvas.

mod geometry;

pub use geometry::{BoundingBox, Geometry, Triangle, resolve};

use crate::palette::ColorValue;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Shape kind chosen in the toolbar.
///
/// `None` is the select/move mode rather than a drawable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    None,
    Line,
    Rectangle,
    Triangle,
    Ellipse,
}

impl ShapeKind {
    /// Whether a drag with this kind creates a shape.
    pub fn is_drawable(self) -> bool {
        !matches!(self, ShapeKind::None)
    }

    /// Display name for this kind.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::None => "Select",
            ShapeKind::Line => "Line",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Ellipse => "Ellipse",
        }
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: ColorValue,
    /// Fill color (Transparent paints nothing but still hit-tests).
    pub fill_color: ColorValue,
    /// Stroke width.
    pub stroke_width: f64,
}

impl ShapeStyle {
    pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

    pub fn new(stroke_color: ColorValue, fill_color: ColorValue, stroke_width: f64) -> Self {
        Self {
            stroke_color,
            fill_color,
            stroke_width,
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: ColorValue::black(),
            fill_color: ColorValue::transparent(),
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
        }
    }
}

/// A shape placed on the canvas.
///
/// The outline is fixed at creation; moving only changes `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    /// Outline as resolved from the drag.
    geometry: Geometry,
    /// Bounds extent at creation.
    size: Size,
    /// Top-left corner of the bounds on the canvas.
    origin: Point,
    /// Style properties.
    pub style: ShapeStyle,
    /// Stacking order; higher draws on top.
    pub z_index: i32,
}

impl Shape {
    /// Create a new shape with a fresh id and `z_index` 0.
    pub fn new(geometry: Geometry, style: ShapeStyle) -> Self {
        let bounds = geometry.bounds();
        Self {
            id: Uuid::new_v4(),
            geometry,
            size: Size::new(bounds.width, bounds.height),
            origin: Point::new(bounds.left, bounds.top),
            style,
            z_index: 0,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Outline at the shape's current position.
    pub fn geometry(&self) -> Geometry {
        self.geometry.placed_at(self.origin)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.origin.x, self.origin.y, self.size.width, self.size.height)
    }

    /// Reposition so the far corner of the bounds sits at `point`.
    ///
    /// Afterwards `left == point.x - width` and `top == point.y - height`.
    pub fn move_far_corner_to(&mut self, point: Point) {
        self.origin = Point::new(point.x - self.size.width, point.y - self.size.height);
    }

    /// Check if a point hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let slop = tolerance + self.style.stroke_width / 2.0;
        match self.geometry() {
            Geometry::Line { p1, p2 } => point_to_segment_dist(point, p1, p2) <= slop,
            Geometry::Rectangle(bbox) => bbox.as_rect().inflate(slop, slop).contains(point),
            Geometry::Ellipse(bbox) => {
                let rect = bbox.as_rect().inflate(slop, slop);
                let center = rect.center();
                let rx = rect.width() / 2.0;
                let ry = rect.height() / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (point.x - center.x) / rx;
                let ny = (point.y - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            Geometry::Triangle(tri) => {
                let [a, b, c] = tri.vertices();
                tri.contains(point)
                    || point_to_segment_dist(point, a, b) <= slop
                    || point_to_segment_dist(point, b, c) <= slop
                    || point_to_segment_dist(point, c, a) <= slop
            }
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind, start: (f64, f64), end: (f64, f64)) -> Shape {
        let start = Point::new(start.0, start.1);
        let end = Point::new(end.0, end.1);
        Shape::new(resolve(kind, start, end).unwrap(), ShapeStyle::default())
    }

    #[test]
    fn test_shape_creation() {
        let s = shape(ShapeKind::Ellipse, (0.0, 0.0), (40.0, 20.0));
        assert_eq!(s.kind(), ShapeKind::Ellipse);
        assert_eq!(s.z_index, 0);
        assert_eq!(s.style.stroke_color, ColorValue::black());
        assert_eq!(s.style.fill_color, ColorValue::transparent());
        assert!((s.style.stroke_width - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = shape(ShapeKind::Line, (0.0, 0.0), (1.0, 1.0));
        let b = shape(ShapeKind::Line, (0.0, 0.0), (1.0, 1.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_move_far_corner_rectangle() {
        let mut s = shape(ShapeKind::Rectangle, (10.0, 10.0), (110.0, 60.0));
        s.move_far_corner_to(Point::new(300.0, 200.0));
        let b = s.bounds();
        assert_eq!(b.left, 300.0 - b.width);
        assert_eq!(b.top, 200.0 - b.height);
        assert!((b.width - 100.0).abs() < f64::EPSILON);
        assert!((b.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_move_keeps_triangle_shape() {
        let mut s = shape(ShapeKind::Triangle, (0.0, 0.0), (20.0, 10.0));
        s.move_far_corner_to(Point::new(50.0, 50.0));
        match s.geometry() {
            Geometry::Triangle(t) => {
                assert_eq!(t.apex, Point::new(40.0, 40.0));
                assert_eq!(t.base_left, Point::new(30.0, 50.0));
                assert_eq!(t.base_right, Point::new(50.0, 50.0));
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_hit_test_rectangle_interior() {
        let s = shape(ShapeKind::Rectangle, (0.0, 0.0), (100.0, 100.0));
        assert!(s.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(s.hit_test(Point::new(101.0, 50.0), 0.0));
        assert!(!s.hit_test(Point::new(150.0, 50.0), 0.0));
        assert!(s.hit_test(Point::new(105.0, 50.0), 10.0));
    }

    #[test]
    fn test_hit_test_ellipse() {
        let s = shape(ShapeKind::Ellipse, (0.0, 0.0), (100.0, 50.0));
        assert!(s.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(!s.hit_test(Point::new(2.0, 2.0), 0.0));
    }

    #[test]
    fn test_hit_test_line() {
        let s = shape(ShapeKind::Line, (0.0, 0.0), (100.0, 0.0));
        assert!(s.hit_test(Point::new(50.0, 1.0), 0.0));
        assert!(s.hit_test(Point::new(50.0, 4.0), 3.0));
        assert!(!s.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_hit_test_triangle() {
        let s = shape(ShapeKind::Triangle, (0.0, 0.0), (10.0, 10.0));
        assert!(s.hit_test(Point::new(5.0, 8.0), 0.0));
        assert!(!s.hit_test(Point::new(30.0, 30.0), 0.0));
    }

    #[test]
    fn test_kind_flags() {
        assert!(!ShapeKind::None.is_drawable());
        assert!(ShapeKind::Triangle.is_drawable());
        assert_eq!(ShapeKind::default(), ShapeKind::None);
        assert_eq!(ShapeKind::None.name(), "Select");
    }

    #[test]
    fn test_move_line_with_fractional_coordinates() {
        let mut s = shape(ShapeKind::Line, (0.1, 0.7), (0.3, 1.9));
        let size = s.bounds();
        for p in [Point::new(100.7, -0.35), Point::new(0.1, 0.2), Point::new(-3.3, 7.77)] {
            s.move_far_corner_to(p);
            let b = s.bounds();
            assert_eq!(b.left, p.x - b.width);
            assert_eq!(b.top, p.y - b.height);
            assert_eq!((b.width, b.height), (size.width, size.height));
        }
        match s.geometry() {
            Geometry::Line { p1, p2 } => {
                assert!((p2.x - p1.x - 0.2).abs() < 1e-9);
                assert!((p2.y - p1.y - 1.2).abs() < 1e-9);
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_move_triangle_with_fractional_coordinates() {
        let mut s = shape(ShapeKind::Triangle, (0.3, 0.1), (1.7, 2.9));
        let size = s.bounds();
        for p in [Point::new(10.01, -0.35), Point::new(0.7, 0.2), Point::new(0.1, 0.3)] {
            s.move_far_corner_to(p);
            let b = s.bounds();
            assert_eq!(b.left, p.x - b.width);
            assert_eq!(b.top, p.y - b.height);
            assert_eq!((b.width, b.height), (size.width, size.height));
        }
    }

    #[test]
    fn test_hit_test_zero_size_triangle() {
        let s = shape(ShapeKind::Triangle, (5.0, 5.0), (5.0, 5.0));
        assert!(s.hit_test(Point::new(5.0, 6.0), 0.0));
        assert!(!s.hit_test(Point::new(500.0, -300.0), 0.0));
        assert!(!s.hit_test(Point::new(50.0, 5.0), 2.0));
    }

    #[test]
    fn test_hit_test_flat_triangle() {
        let s = shape(ShapeKind::Triangle, (0.0, 0.0), (10.0, 0.0));
        assert!(s.hit_test(Point::new(5.0, 1.0), 0.0));
        assert!(!s.hit_test(Point::new(1000.0, 0.0), 0.0));
    }
}
