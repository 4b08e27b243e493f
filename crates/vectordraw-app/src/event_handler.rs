//! Event handling for tool interactions.

use crate::app::AppError;
use serde::{Deserialize, Serialize};
use vectordraw_core::controller::{Command, InteractionController};
use vectordraw_core::input::{InputState, MouseButton, PointerEvent};
use vectordraw_core::palette::ColorPalette;
use vectordraw_core::shapes::ShapeKind;

/// A user-interface event: a toolbar pick or a canvas pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    /// Shape kind chosen in the toolbar.
    SelectTool { kind: ShapeKind },
    /// Pointer event on the canvas.
    Pointer { event: PointerEvent },
    /// Fill color chosen by palette name.
    PickFill { color: String },
    /// Stroke color chosen by palette name.
    PickStroke { color: String },
    /// Stacking order entered for the selection.
    SetZIndex { z_index: i32 },
    /// Remove button.
    Remove,
}

/// Translates UI events into controller commands.
#[derive(Debug, Clone)]
pub struct EventHandler {
    input: InputState,
    /// Pointer slop for hit-testing.
    hit_tolerance: f64,
}

impl EventHandler {
    pub fn new(hit_tolerance: f64) -> Self {
        Self {
            input: InputState::new(),
            hit_tolerance,
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Handle one event.
    pub fn handle(
        &mut self,
        event: &UiEvent,
        palette: &ColorPalette,
        controller: &mut InteractionController,
    ) -> Result<(), AppError> {
        match event {
            UiEvent::SelectTool { kind } => controller.dispatch(Command::SelectTool(*kind)),
            UiEvent::Pointer { event } => self.handle_pointer(*event, controller),
            UiEvent::PickFill { color } => {
                controller.dispatch(Command::RecolorFill(palette.color(color)?));
            }
            UiEvent::PickStroke { color } => {
                controller.dispatch(Command::RecolorStroke(palette.color(color)?));
            }
            UiEvent::SetZIndex { z_index } => controller.dispatch(Command::SetZIndex(*z_index)),
            UiEvent::Remove => controller.dispatch(Command::Remove),
        }
        Ok(())
    }

    fn handle_pointer(&mut self, event: PointerEvent, controller: &mut InteractionController) {
        self.input.handle_pointer_event(event);
        let select_mode = controller.armed_kind() == ShapeKind::None;

        match event {
            PointerEvent::Down { position, button } => {
                if button != MouseButton::PRIMARY {
                    return;
                }
                let hit = if select_mode {
                    controller.scene().shape_at(position, self.hit_tolerance)
                } else {
                    None
                };
                controller.dispatch(Command::PointerDown { point: position, hit });
            }
            PointerEvent::Move { .. } => {
                controller.dispatch(Command::PointerMove {
                    point: self.input.pointer_position,
                    primary_held: self.input.primary_down(),
                });
            }
            PointerEvent::Up { position, button } => {
                if button != MouseButton::PRIMARY {
                    return;
                }
                controller.dispatch(Command::PointerUp { point: position });
                // Shapes are activated on release, after any move has landed.
                if select_mode {
                    if let Some(id) = controller.scene().shape_at(position, self.hit_tolerance) {
                        controller.dispatch(Command::ShapeActivated(id));
                    }
                }
            }
        }
    }
}
