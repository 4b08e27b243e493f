//! Drag-to-geometry resolution.

use super::ShapeKind;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned box with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Normalize two arbitrary corners into a box.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            left: p1.x.min(p2.x),
            top: p1.y.min(p2.y),
            width: (p2.x - p1.x).abs(),
            height: (p2.y - p1.y).abs(),
        }
    }

    /// Smallest box containing all `points`.
    pub fn enclosing(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// Three vertices of a drag-defined triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub apex: Point,
    pub base_left: Point,
    pub base_right: Point,
}

impl Triangle {
    /// Vertices in outline order: apex, base right, base left.
    pub fn vertices(&self) -> [Point; 3] {
        [self.apex, self.base_right, self.base_left]
    }

    /// Twice the signed area of the triangle.
    pub fn doubled_area(&self) -> f64 {
        let [a, b, c] = self.vertices();
        cross(a, b, c)
    }

    /// Whether `point` lies inside or on the triangle.
    ///
    /// A triangle with collinear vertices encloses nothing.
    pub fn contains(&self, point: Point) -> bool {
        if self.doubled_area().abs() < f64::EPSILON {
            return false;
        }
        let [a, b, c] = self.vertices();
        let d1 = cross(a, b, point);
        let d2 = cross(b, c, point);
        let d3 = cross(c, a, point);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Concrete outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Segment from `p1` to `p2`, in drag order.
    Line { p1: Point, p2: Point },
    Rectangle(BoundingBox),
    /// Ellipse inscribed in the box.
    Ellipse(BoundingBox),
    Triangle(Triangle),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Line { .. } => ShapeKind::Line,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Ellipse(_) => ShapeKind::Ellipse,
            Geometry::Triangle(_) => ShapeKind::Triangle,
        }
    }

    /// Axis-aligned bounds of the outline.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Geometry::Line { p1, p2 } => BoundingBox::from_corners(*p1, *p2),
            Geometry::Rectangle(bbox) | Geometry::Ellipse(bbox) => *bbox,
            Geometry::Triangle(tri) => BoundingBox::enclosing(&tri.vertices()),
        }
    }

    /// Shift every vertex by `delta` without reshaping.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Geometry::Line { p1, p2 } => {
                *p1 += delta;
                *p2 += delta;
            }
            Geometry::Rectangle(bbox) | Geometry::Ellipse(bbox) => {
                bbox.left += delta.x;
                bbox.top += delta.y;
            }
            Geometry::Triangle(tri) => {
                tri.apex += delta;
                tri.base_left += delta;
                tri.base_right += delta;
            }
        }
    }

    /// The same outline with the top-left corner of its bounds at `origin`.
    ///
    /// Boxes land exactly on `origin`; other kinds are translated.
    pub fn placed_at(&self, origin: Point) -> Geometry {
        match *self {
            Geometry::Rectangle(bbox) => {
                Geometry::Rectangle(BoundingBox::new(origin.x, origin.y, bbox.width, bbox.height))
            }
            Geometry::Ellipse(bbox) => {
                Geometry::Ellipse(BoundingBox::new(origin.x, origin.y, bbox.width, bbox.height))
            }
            mut other => {
                let bounds = other.bounds();
                other.translate(origin - Point::new(bounds.left, bounds.top));
                other
            }
        }
    }
}

/// Resolve a drag from `start` to `end` into geometry for `kind`.
///
/// Zero-length drags are accepted and produce zero-size geometry.
/// `ShapeKind::None` is the select mode and has no geometry.
pub fn resolve(kind: ShapeKind, start: Point, end: Point) -> Option<Geometry> {
    let geometry = match kind {
        ShapeKind::None => return None,
        ShapeKind::Line => Geometry::Line { p1: start, p2: end },
        ShapeKind::Rectangle => Geometry::Rectangle(BoundingBox::from_corners(start, end)),
        ShapeKind::Ellipse => Geometry::Ellipse(BoundingBox::from_corners(start, end)),
        ShapeKind::Triangle => {
            // Vertical extent is not normalized: an upward drag puts the
            // apex below the base.
            let mid_x = (start.x + end.x) / 2.0;
            Geometry::Triangle(Triangle {
                apex: Point::new(mid_x, start.y),
                base_left: Point::new(start.x, end.y),
                base_right: Point::new(end.x, end.y),
            })
        }
    };
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(geometry: Option<Geometry>) -> BoundingBox {
        match geometry {
            Some(Geometry::Rectangle(b)) | Some(Geometry::Ellipse(b)) => b,
            other => panic!("expected a box, got {:?}", other),
        }
    }

    fn triangle(start: (f64, f64), end: (f64, f64)) -> Triangle {
        let start = Point::new(start.0, start.1);
        let end = Point::new(end.0, end.1);
        match resolve(ShapeKind::Triangle, start, end) {
            Some(Geometry::Triangle(t)) => t,
            other => panic!("expected a triangle, got {:?}", other),
        }
    }

    #[test]
    fn test_rectangle_from_drag() {
        let b = bbox(resolve(ShapeKind::Rectangle, Point::ZERO, Point::new(10.0, 20.0)));
        assert_eq!(b, BoundingBox::new(0.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_rectangle_direction_independent() {
        let corners = [
            (Point::new(10.0, 10.0), Point::new(110.0, 60.0)),
            (Point::new(110.0, 60.0), Point::new(10.0, 10.0)),
            (Point::new(110.0, 10.0), Point::new(10.0, 60.0)),
            (Point::new(10.0, 60.0), Point::new(110.0, 10.0)),
        ];
        for (s, e) in corners {
            let forward = bbox(resolve(ShapeKind::Rectangle, s, e));
            let backward = bbox(resolve(ShapeKind::Rectangle, e, s));
            assert_eq!(forward, backward);
            assert_eq!(forward, BoundingBox::new(10.0, 10.0, 100.0, 50.0));
            assert!(forward.width >= 0.0 && forward.height >= 0.0);
        }
    }

    #[test]
    fn test_ellipse_uses_rectangle_box() {
        let s = Point::new(-5.0, 40.0);
        let e = Point::new(15.0, -2.5);
        assert_eq!(
            bbox(resolve(ShapeKind::Ellipse, s, e)),
            bbox(resolve(ShapeKind::Rectangle, s, e))
        );
    }

    #[test]
    fn test_degenerate_drag_produces_zero_box() {
        let p = Point::new(7.0, 7.0);
        let b = bbox(resolve(ShapeKind::Rectangle, p, p));
        assert_eq!(b, BoundingBox::new(7.0, 7.0, 0.0, 0.0));
        assert!(b.is_empty());
    }

    #[test]
    fn test_line_preserves_order() {
        let s = Point::new(30.0, 5.0);
        let e = Point::new(-4.0, 12.0);
        assert_eq!(
            resolve(ShapeKind::Line, s, e),
            Some(Geometry::Line { p1: s, p2: e })
        );
        assert_eq!(
            resolve(ShapeKind::Line, e, s),
            Some(Geometry::Line { p1: e, p2: s })
        );
    }

    #[test]
    fn test_triangle_downward_drag() {
        let t = triangle((0.0, 0.0), (10.0, 10.0));
        assert_eq!(t.apex, Point::new(5.0, 0.0));
        assert_eq!(t.base_left, Point::new(0.0, 10.0));
        assert_eq!(t.base_right, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_triangle_upward_drag_is_inverted() {
        let t = triangle((0.0, 10.0), (10.0, 0.0));
        assert_eq!(t.apex, Point::new(5.0, 10.0));
        assert_eq!(t.base_left.y, 0.0);
        assert_eq!(t.base_right.y, 0.0);
        assert!(t.apex.y > t.base_left.y);
    }

    #[test]
    fn test_triangle_leftward_drag_keeps_start_on_left_slot() {
        let t = triangle((20.0, 0.0), (0.0, 10.0));
        assert_eq!(t.apex, Point::new(10.0, 0.0));
        assert_eq!(t.base_left, Point::new(20.0, 10.0));
        assert_eq!(t.base_right, Point::new(0.0, 10.0));
    }

    #[test]
    fn test_none_kind_has_no_geometry() {
        assert!(resolve(ShapeKind::None, Point::ZERO, Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_bounds_and_translate() {
        let mut g = Geometry::Triangle(triangle((0.0, 10.0), (20.0, 0.0)));
        assert_eq!(g.bounds(), BoundingBox::new(0.0, 0.0, 20.0, 10.0));
        g.translate(Vec2::new(5.0, -5.0));
        assert_eq!(g.bounds(), BoundingBox::new(5.0, -5.0, 20.0, 10.0));
        assert_eq!(g.kind(), ShapeKind::Triangle);
    }

    #[test]
    fn test_triangle_contains() {
        let t = triangle((0.0, 0.0), (10.0, 10.0));
        assert!(t.contains(Point::new(5.0, 5.0)));
        assert!(t.contains(Point::new(5.0, 0.0)));
        assert!(!t.contains(Point::new(1.0, 1.0)));
        assert!(!t.contains(Point::new(5.0, 11.0)));
    }

    #[test]
    fn test_zero_size_triangle_contains_nothing() {
        let t = triangle((5.0, 5.0), (5.0, 5.0));
        assert!(t.doubled_area().abs() < f64::EPSILON);
        assert!(!t.contains(Point::new(500.0, -300.0)));
        assert!(!t.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_flat_triangle_contains_nothing() {
        let t = triangle((0.0, 0.0), (10.0, 0.0));
        assert!(!t.contains(Point::new(1000.0, 0.0)));
        assert!(!t.contains(Point::new(5.0, 0.0)));
    }

    #[test]
    fn test_placed_at_keeps_extent() {
        let (start, end) = (Point::new(0.1, 0.7), Point::new(0.3, 1.9));
        let boxed = resolve(ShapeKind::Ellipse, start, end).unwrap();
        let size = boxed.bounds();
        let placed = boxed.placed_at(Point::new(100.5, -1.55));
        assert_eq!(placed.bounds(), BoundingBox::new(100.5, -1.55, size.width, size.height));

        let tri = Geometry::Triangle(triangle((0.0, 0.0), (20.0, 10.0)));
        match tri.placed_at(Point::new(30.0, 40.0)) {
            Geometry::Triangle(t) => {
                assert_eq!(t.apex, Point::new(40.0, 40.0));
                assert_eq!(t.base_left, Point::new(30.0, 50.0));
                assert_eq!(t.base_right, Point::new(50.0, 50.0));
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
