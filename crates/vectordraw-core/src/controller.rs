//! Pointer-driven interaction state machine.
//!
//! The controller turns pointer and picker events into scene mutations:
//! drags create shapes, presses on existing shapes in select mode move
//! them, and the pickers recolor or restack the selected shape.

use crate::config::{CanvasConfig, ConfigError};
use crate::palette::{ColorPalette, ColorValue};
use crate::scene::SceneModel;
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle, resolve};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Current phase of the pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Select mode, nothing captured.
    #[default]
    Idle,
    /// A drawable kind is chosen and waiting for a drag.
    ToolArmed(ShapeKind),
    /// Pointer is down with a drawable kind.
    Dragging {
        kind: ShapeKind,
        start: Point,
        /// Last pointer position seen while the button was held.
        end: Option<Point>,
    },
    /// An existing shape is captured and follows the pointer.
    MovingShape { shape_id: ShapeId },
}

/// Values shown by the stroke, fill and z-index pickers.
///
/// New shapes take their colors from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerState {
    pub stroke_color: ColorValue,
    pub fill_color: ColorValue,
    pub z_index: i32,
}

/// A named controller event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SelectTool(ShapeKind),
    PointerDown { point: Point, hit: Option<ShapeId> },
    PointerMove { point: Point, primary_held: bool },
    PointerUp { point: Point },
    ShapeActivated(ShapeId),
    RecolorFill(ColorValue),
    RecolorStroke(ColorValue),
    SetZIndex(i32),
    Remove,
}

/// Drives shape creation, selection and movement.
#[derive(Debug)]
pub struct InteractionController {
    scene: SceneModel,
    state: InteractionState,
    picker: PickerState,
    stroke_width: f64,
}

impl InteractionController {
    /// Create a controller with the palette's default colors.
    pub fn new(palette: &ColorPalette) -> Self {
        Self {
            scene: SceneModel::new(),
            state: InteractionState::Idle,
            picker: PickerState {
                stroke_color: palette.default_stroke(),
                fill_color: palette.default_fill(),
                z_index: 0,
            },
            stroke_width: ShapeStyle::DEFAULT_STROKE_WIDTH,
        }
    }

    /// Create a controller using configured defaults.
    pub fn with_config(palette: &ColorPalette, config: &CanvasConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (stroke_color, fill_color) = config.default_colors(palette)?;
        let mut controller = Self::new(palette);
        controller.picker.stroke_color = stroke_color;
        controller.picker.fill_color = fill_color;
        controller.stroke_width = config.stroke_width;
        Ok(controller)
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// The kind the toolbar currently has armed (`None` in select mode).
    pub fn armed_kind(&self) -> ShapeKind {
        match self.state {
            InteractionState::Idle | InteractionState::MovingShape { .. } => ShapeKind::None,
            InteractionState::ToolArmed(kind) | InteractionState::Dragging { kind, .. } => kind,
        }
    }

    pub fn picker(&self) -> PickerState {
        self.picker
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// Mutable scene access, for registering observers.
    pub fn scene_mut(&mut self) -> &mut SceneModel {
        &mut self.scene
    }

    /// Route a named command to its handler.
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::SelectTool(kind) => self.select_tool(kind),
            Command::PointerDown { point, hit } => self.pointer_down(point, hit),
            Command::PointerMove { point, primary_held } => self.pointer_move(point, primary_held),
            Command::PointerUp { point } => {
                self.pointer_up(point);
            }
            Command::ShapeActivated(id) => {
                self.shape_activated(id);
            }
            Command::RecolorFill(color) => self.recolor_fill(color),
            Command::RecolorStroke(color) => self.recolor_stroke(color),
            Command::SetZIndex(z_index) => self.set_z_index(z_index),
            Command::Remove => {
                self.remove();
            }
        }
    }

    /// Arm a shape kind; `ShapeKind::None` enters select mode.
    ///
    /// Any gesture in progress is abandoned.
    pub fn select_tool(&mut self, kind: ShapeKind) {
        self.state = if kind.is_drawable() {
            InteractionState::ToolArmed(kind)
        } else {
            InteractionState::Idle
        };
        log::debug!("tool selected: {}", kind.name());
    }

    /// Primary button pressed at `point`.
    ///
    /// `hit` is the shape under the pointer as reported by the hit-tester.
    pub fn pointer_down(&mut self, point: Point, hit: Option<ShapeId>) {
        match self.state {
            InteractionState::ToolArmed(kind) | InteractionState::Dragging { kind, .. } => {
                self.state = InteractionState::Dragging {
                    kind,
                    start: point,
                    end: None,
                };
            }
            InteractionState::Idle => {
                if let Some(id) = hit {
                    if self.scene.select(id) {
                        log::debug!("captured shape {}", id);
                        self.state = InteractionState::MovingShape { shape_id: id };
                    }
                }
            }
            InteractionState::MovingShape { .. } => {}
        }
    }

    /// Pointer moved to `point`.
    pub fn pointer_move(&mut self, point: Point, primary_held: bool) {
        match self.state {
            InteractionState::Dragging { kind, start, .. } if primary_held => {
                self.state = InteractionState::Dragging {
                    kind,
                    start,
                    end: Some(point),
                };
            }
            InteractionState::MovingShape { shape_id } => {
                if !primary_held {
                    log::debug!("released shape {} on button-less move", shape_id);
                    self.state = InteractionState::Idle;
                } else if !self.scene.move_shape(shape_id, point) {
                    self.state = InteractionState::Idle;
                }
            }
            _ => {}
        }
    }

    /// Primary button released. Returns the id of a newly created shape.
    pub fn pointer_up(&mut self, _point: Point) -> Option<ShapeId> {
        match self.state {
            InteractionState::Dragging { kind, start, end } => {
                self.state = InteractionState::ToolArmed(kind);
                // A press without any move creates nothing.
                let end = end?;
                let geometry = resolve(kind, start, end)?;
                let style = ShapeStyle::new(
                    self.picker.stroke_color,
                    self.picker.fill_color,
                    self.stroke_width,
                );
                Some(self.scene.add_shape(geometry, style))
            }
            InteractionState::MovingShape { .. } => {
                self.state = InteractionState::Idle;
                None
            }
            InteractionState::Idle | InteractionState::ToolArmed(_) => None,
        }
    }

    /// A shape was clicked. Only honored in select mode.
    ///
    /// Selects the shape and loads its style into the pickers.
    pub fn shape_activated(&mut self, id: ShapeId) -> bool {
        if self.armed_kind().is_drawable() || !self.scene.select(id) {
            return false;
        }
        if let Some(style) = self.scene.selection_style() {
            self.picker = PickerState {
                stroke_color: style.stroke_color,
                fill_color: style.fill_color,
                z_index: style.z_index,
            };
        }
        true
    }

    /// Pick a fill color; recolors the selected shape if any.
    pub fn recolor_fill(&mut self, color: ColorValue) {
        self.picker.fill_color = color;
        self.scene.set_selected_fill(color);
    }

    /// Pick a stroke color; recolors the selected shape if any.
    pub fn recolor_stroke(&mut self, color: ColorValue) {
        self.picker.stroke_color = color;
        self.scene.set_selected_stroke(color);
    }

    /// Set the z-index field; restacks the selected shape if any.
    pub fn set_z_index(&mut self, z_index: i32) {
        self.picker.z_index = z_index;
        self.scene.set_selected_z_index(z_index);
    }

    /// Delete the selected shape.
    pub fn remove(&mut self) -> Option<Shape> {
        self.scene.remove_selected()
    }
}
