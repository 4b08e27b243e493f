//! vectordraw Render Library
//!
//! Renderer abstraction for vectordraw. Scenes are translated into
//! primitive draw calls on a [`DrawSurface`]; [`DrawList`] records them
//! for headless output.

mod draw_list;
mod renderer;
mod scene_renderer;

pub use draw_list::{DrawCommand, DrawList, RecordedPaint};
pub use renderer::{DrawSurface, Paint, RenderContext, RenderResult, Renderer, RendererError};
pub use scene_renderer::SceneRenderer;
