//! Application state and session replay.

use crate::event_handler::{EventHandler, UiEvent};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use vectordraw_core::config::{CanvasConfig, ConfigError};
use vectordraw_core::controller::InteractionController;
use vectordraw_core::palette::{ColorPalette, PaletteError};
use vectordraw_core::scene::SceneEvent;
use vectordraw_render::{DrawList, RenderContext, Renderer, RendererError, SceneRenderer};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Session error: {0}")]
    Session(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Palette name of the canvas background.
    pub background_color: String,
    /// Palette name of the selection outline.
    pub selection_color: String,
    pub canvas: CanvasConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "vectordraw".to_string(),
            width: 1280,
            height: 800,
            background_color: "White".to_string(),
            selection_color: "DodgerBlue".to_string(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.canvas.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

/// Read a session script: a JSON array of UI events.
pub fn load_session(path: &Path) -> Result<Vec<UiEvent>, AppError> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Session(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| AppError::Session(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    palette: ColorPalette,
    controller: InteractionController,
    event_handler: EventHandler,
    renderer: SceneRenderer<DrawList>,
    background_color: Color,
    selection_color: Color,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let palette = ColorPalette::named_colors();
        let background_color = palette.color(&config.background_color)?.into();
        let selection_color = palette.color(&config.selection_color)?.into();

        let mut controller = InteractionController::with_config(&palette, &config.canvas)?;
        controller.scene_mut().subscribe(|event: &SceneEvent| {
            log::debug!("Scene event: {:?}", event);
        });

        log::info!("{} ({}x{})", config.title, config.width, config.height);

        Ok(Self {
            event_handler: EventHandler::new(config.canvas.hit_tolerance),
            config,
            palette,
            controller,
            renderer: SceneRenderer::new(DrawList::new()),
            background_color,
            selection_color,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Handle one UI event.
    pub fn handle(&mut self, event: &UiEvent) -> Result<(), AppError> {
        self.event_handler
            .handle(event, &self.palette, &mut self.controller)
    }

    /// Handle every event in order, stopping at the first error.
    pub fn replay(&mut self, events: &[UiEvent]) -> Result<(), AppError> {
        for event in events {
            self.handle(event)?;
        }
        log::info!(
            "Replayed {} events, {} shapes on canvas",
            events.len(),
            self.controller.scene().len()
        );
        Ok(())
    }

    /// Render the current scene and return the recorded draw calls.
    pub fn render(&mut self) -> Result<&DrawList, AppError> {
        let ctx = RenderContext::new(self.controller.scene())
            .with_background(self.background_color)
            .with_selection_color(self.selection_color);
        self.renderer.build_scene(&ctx)?;
        Ok(self.renderer.surface())
    }
}
