//! vectordraw Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! vectordraw canvas: the color palette, drag-to-geometry resolution,
//! the scene model and the pointer state machine.

pub mod config;
pub mod controller;
pub mod input;
pub mod palette;
pub mod scene;
pub mod shapes;

pub use config::{CanvasConfig, ConfigError};
pub use controller::{Command, InteractionController, InteractionState, PickerState};
pub use input::{InputState, MouseButton, PointerEvent};
pub use palette::{ColorPalette, ColorValue, PaletteEntry, PaletteError};
pub use scene::{SceneEvent, SceneModel, SelectionStyle};
pub use shapes::{BoundingBox, Geometry, Shape, ShapeId, ShapeKind, ShapeStyle, Triangle, resolve};
