//! Canvas configuration.

use crate::palette::{BLACK, ColorPalette, ColorValue, TRANSPARENT};
use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("Unknown color in config: {0}")]
    UnknownColor(String),
}

/// Defaults applied to newly drawn shapes and pointer queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Stroke width of new shapes.
    pub stroke_width: f64,
    /// Extra pointer slop for hit-testing, in canvas units.
    pub hit_tolerance: f64,
    /// Palette name of the initial stroke color.
    pub default_stroke: String,
    /// Palette name of the initial fill color.
    pub default_fill: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_width: ShapeStyle::DEFAULT_STROKE_WIDTH,
            hit_tolerance: 2.0,
            default_stroke: BLACK.to_string(),
            default_fill: TRANSPARENT.to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Reject non-finite or negative sizes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("stroke_width", self.stroke_width),
            ("hit_tolerance", self.hit_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Resolve the default stroke and fill names against `palette`.
    pub fn default_colors(
        &self,
        palette: &ColorPalette,
    ) -> Result<(ColorValue, ColorValue), ConfigError> {
        let lookup = |name: &str| {
            palette
                .color(name)
                .map_err(|_| ConfigError::UnknownColor(name.to_string()))
        };
        Ok((lookup(&self.default_stroke)?, lookup(&self.default_fill)?))
    }
}
