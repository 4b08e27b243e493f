//! Scene model: the ordered shape collection and the current selection.

use crate::palette::ColorValue;
use crate::shapes::{Geometry, Shape, ShapeId, ShapeStyle};
use kurbo::Point;
use std::fmt;

/// Change notification emitted after every scene mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    ShapeAdded(ShapeId),
    ShapeRemoved(ShapeId),
    ShapeMoved(ShapeId),
    StrokeChanged { id: ShapeId, color: ColorValue },
    FillChanged { id: ShapeId, color: ColorValue },
    ZIndexChanged { id: ShapeId, z_index: i32 },
    SelectionChanged(Option<ShapeId>),
}

/// Callback registered with [`SceneModel::subscribe`].
pub type SceneObserver = Box<dyn FnMut(&SceneEvent)>;

/// Style of the selected shape, used to synchronize the pickers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStyle {
    pub stroke_color: ColorValue,
    pub fill_color: ColorValue,
    pub z_index: i32,
}

/// All shapes on the canvas, in creation order.
#[derive(Default)]
pub struct SceneModel {
    /// Shapes in insertion order.
    shapes: Vec<Shape>,
    /// At most one selected shape.
    selected: Option<ShapeId>,
    observers: Vec<SceneObserver>,
}

impl fmt::Debug for SceneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneModel")
            .field("shapes", &self.shapes)
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SceneModel {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a change observer.
    pub fn subscribe(&mut self, observer: impl FnMut(&SceneEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SceneEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    /// Append a shape with `z_index` 0 and make it the selection.
    pub fn add_shape(&mut self, geometry: Geometry, style: ShapeStyle) -> ShapeId {
        let shape = Shape::new(geometry, style);
        let id = shape.id();
        log::debug!("add {:?} shape {}", shape.kind(), id);
        self.shapes.push(shape);
        self.emit(SceneEvent::ShapeAdded(id));
        self.set_selection(Some(id));
        id
    }

    /// Delete the selected shape. No-op when nothing is selected.
    pub fn remove_selected(&mut self) -> Option<Shape> {
        let id = self.selected?;
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        let removed = self.shapes.remove(index);
        log::debug!("remove shape {}", id);
        self.emit(SceneEvent::ShapeRemoved(id));
        self.set_selection(None);
        Some(removed)
    }

    /// Set the stacking order of the selected shape.
    pub fn set_selected_z_index(&mut self, z_index: i32) -> bool {
        let Some(shape) = self.selected_mut() else {
            return false;
        };
        shape.z_index = z_index;
        let id = shape.id();
        self.emit(SceneEvent::ZIndexChanged { id, z_index });
        true
    }

    /// Recolor the fill of the selected shape.
    pub fn set_selected_fill(&mut self, color: ColorValue) -> bool {
        let Some(shape) = self.selected_mut() else {
            return false;
        };
        shape.style.fill_color = color;
        let id = shape.id();
        self.emit(SceneEvent::FillChanged { id, color });
        true
    }

    /// Recolor the stroke of the selected shape.
    pub fn set_selected_stroke(&mut self, color: ColorValue) -> bool {
        let Some(shape) = self.selected_mut() else {
            return false;
        };
        shape.style.stroke_color = color;
        let id = shape.id();
        self.emit(SceneEvent::StrokeChanged { id, color });
        true
    }

    /// Select a shape. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: ShapeId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.set_selection(Some(id));
        true
    }

    /// Clear the selection.
    pub fn select_none(&mut self) {
        self.set_selection(None);
    }

    fn set_selection(&mut self, selected: Option<ShapeId>) {
        if self.selected != selected {
            self.selected = selected;
            self.emit(SceneEvent::SelectionChanged(selected));
        }
    }

    /// Move a shape so its far bounding corner sits at `point`.
    pub fn move_shape(&mut self, id: ShapeId, point: Point) -> bool {
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        shape.move_far_corner_to(point);
        self.emit(SceneEvent::ShapeMoved(id));
        true
    }

    /// Shapes sorted by ascending `z_index`, ties in insertion order.
    pub fn render_order(&self) -> Vec<&Shape> {
        let mut ordered: Vec<&Shape> = self.shapes.iter().collect();
        ordered.sort_by_key(|s| s.z_index);
        ordered
    }

    /// Topmost shape under `point`, if any.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|s| s.hit_test(point, tolerance))
            .map(|s| s.id())
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    fn selected_mut(&mut self) -> Option<&mut Shape> {
        let id = self.selected?;
        self.get_mut(id)
    }

    /// Picker-facing view of the selected shape's style.
    pub fn selection_style(&self) -> Option<SelectionStyle> {
        self.selected().map(|s| SelectionStyle {
            stroke_color: s.style.stroke_color,
            fill_color: s.style.fill_color,
            z_index: s.z_index,
        })
    }

    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ShapeKind, resolve};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(scene: &mut SceneModel, x: f64, y: f64) -> ShapeId {
        let (start, end) = (Point::new(x, y), Point::new(x + 10.0, y + 10.0));
        let geometry = resolve(ShapeKind::Rectangle, start, end).unwrap();
        scene.add_shape(geometry, ShapeStyle::default())
    }

    #[test]
    fn test_add_shape_selects_it() {
        let mut scene = SceneModel::new();
        let a = rect(&mut scene, 0.0, 0.0);
        assert_eq!(scene.selected_id(), Some(a));
        let b = rect(&mut scene, 20.0, 0.0);
        assert_eq!(scene.selected_id(), Some(b));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(a).map(|s| s.z_index), Some(0));
    }

    #[test]
    fn test_render_order_stable_by_z_index() {
        let mut scene = SceneModel::new();
        let a = rect(&mut scene, 0.0, 0.0);
        scene.set_selected_z_index(2);
        let b = rect(&mut scene, 10.0, 0.0);
        scene.set_selected_z_index(1);
        let c = rect(&mut scene, 20.0, 0.0);
        scene.set_selected_z_index(2);

        let order: Vec<ShapeId> = scene.render_order().iter().map(|s| s.id()).collect();
        assert_eq!(order, vec![b, a, c]);
        // Insertion order itself is untouched.
        let inserted: Vec<ShapeId> = scene.shapes().iter().map(|s| s.id()).collect();
        assert_eq!(inserted, vec![a, b, c]);
    }

    #[test]
    fn test_negative_z_index_goes_to_back() {
        let mut scene = SceneModel::new();
        let a = rect(&mut scene, 0.0, 0.0);
        let b = rect(&mut scene, 0.0, 0.0);
        scene.set_selected_z_index(-3);
        let order: Vec<ShapeId> = scene.render_order().iter().map(|s| s.id()).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn test_remove_selected_twice() {
        let mut scene = SceneModel::new();
        rect(&mut scene, 0.0, 0.0);
        assert!(scene.remove_selected().is_some());
        assert!(scene.is_empty());
        assert_eq!(scene.selected_id(), None);
        assert!(scene.remove_selected().is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_remove_with_nothing_selected() {
        let mut scene = SceneModel::new();
        rect(&mut scene, 0.0, 0.0);
        scene.select_none();
        assert!(scene.remove_selected().is_none());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_style_commands_require_selection() {
        let mut scene = SceneModel::new();
        let id = rect(&mut scene, 0.0, 0.0);
        scene.select_none();
        let red = ColorValue::new(255, 0, 0, 255);
        assert!(!scene.set_selected_fill(red));
        assert!(!scene.set_selected_stroke(red));
        assert!(!scene.set_selected_z_index(4));
        assert_eq!(scene.get(id).map(|s| s.style), Some(ShapeStyle::default()));

        assert!(scene.select(id));
        assert!(scene.set_selected_fill(red));
        assert!(scene.set_selected_stroke(red));
        assert!(scene.set_selected_z_index(4));
        let style = scene.selection_style().unwrap();
        assert_eq!(style.fill_color, red);
        assert_eq!(style.stroke_color, red);
        assert_eq!(style.z_index, 4);
    }

    #[test]
    fn test_select_unknown_id() {
        let mut scene = SceneModel::new();
        let id = rect(&mut scene, 0.0, 0.0);
        assert!(!scene.select(uuid::Uuid::new_v4()));
        assert_eq!(scene.selected_id(), Some(id));
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let mut scene = SceneModel::new();
        let a = rect(&mut scene, 0.0, 0.0);
        scene.set_selected_z_index(5);
        let b = rect(&mut scene, 5.0, 5.0);
        assert_eq!(scene.shape_at(Point::new(7.0, 7.0), 0.0), Some(a));
        scene.set_selected_z_index(5);
        assert_eq!(scene.shape_at(Point::new(7.0, 7.0), 0.0), Some(b));
        assert_eq!(scene.shape_at(Point::new(500.0, 500.0), 0.0), None);
    }

    #[test]
    fn test_degenerate_triangle_does_not_cover_canvas() {
        let mut scene = SceneModel::new();
        let a = rect(&mut scene, 0.0, 0.0);
        for end in [Point::new(40.0, 40.0), Point::new(60.0, 40.0)] {
            let geometry = resolve(ShapeKind::Triangle, Point::new(40.0, 40.0), end).unwrap();
            scene.add_shape(geometry, ShapeStyle::default());
            scene.set_selected_z_index(9);
        }
        assert_eq!(scene.shape_at(Point::new(5.0, 5.0), 2.0), Some(a));
        assert_eq!(scene.shape_at(Point::new(1000.0, 40.0), 2.0), None);
    }

    #[test]
    fn test_observers_see_each_change() {
        let mut scene = SceneModel::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        scene.subscribe(move |e| sink.borrow_mut().push(*e));

        let id = rect(&mut scene, 0.0, 0.0);
        scene.set_selected_z_index(3);
        scene.move_shape(id, Point::new(50.0, 50.0));
        scene.remove_selected();
        scene.remove_selected();

        assert_eq!(
            *events.borrow(),
            vec![
                SceneEvent::ShapeAdded(id),
                SceneEvent::SelectionChanged(Some(id)),
                SceneEvent::ZIndexChanged { id, z_index: 3 },
                SceneEvent::ShapeMoved(id),
                SceneEvent::ShapeRemoved(id),
                SceneEvent::SelectionChanged(None),
            ]
        );
    }
}
