//! Pointer input tracking.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// The button that draws and drags.
    pub const PRIMARY: MouseButton = MouseButton::Left;
}

/// Raw pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => *position,
        }
    }
}

/// Tracks pointer position and held buttons across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position.
    pub pointer_position: Point,
    /// Currently pressed mouse buttons.
    pressed_buttons: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { button, .. } => {
                self.pressed_buttons.insert(button);
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
            }
            PointerEvent::Move { .. } => {}
        }
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Whether the primary button is held.
    pub fn primary_down(&self) -> bool {
        self.is_button_down(MouseButton::PRIMARY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button_tracking() {
        let mut input = InputState::new();
        assert!(!input.primary_down());

        input.handle_pointer_event(PointerEvent::Down {
            position: Point::new(4.0, 5.0),
            button: MouseButton::Left,
        });
        assert!(input.primary_down());
        assert_eq!(input.pointer_position, Point::new(4.0, 5.0));

        input.handle_pointer_event(PointerEvent::Move { position: Point::new(9.0, 9.0) });
        assert_eq!(input.pointer_position, Point::new(9.0, 9.0));
        assert!(input.primary_down());

        input.handle_pointer_event(PointerEvent::Up {
            position: Point::new(9.0, 9.0),
            button: MouseButton::Left,
        });
        assert!(!input.primary_down());
    }

    #[test]
    fn test_secondary_button_is_not_primary() {
        let mut input = InputState::new();
        input.handle_pointer_event(PointerEvent::Down {
            position: Point::new(1.0, 1.0),
            button: MouseButton::Right,
        });
        assert!(input.is_button_down(MouseButton::Right));
        assert!(!input.primary_down());
    }
}
