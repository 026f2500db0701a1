//! Configuration for Draw2D
//!
//! Configuration is organized into sections:
//! - Shape defaults (initial color, polygon closed flag, rescale epsilon)
//! - Logging preferences (filter directive, output format)
//!
//! Files are read and written as JSON or TOML, chosen by extension.

use crate::data::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Old extents at or below this magnitude are not rescaled
pub const DEFAULT_DEGENERATE_EXTENT_EPSILON: f64 = 1e-20;

/// Defaults applied to newly created shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    /// Initial color of new shapes
    pub color: Color,
    /// Whether new polygons start closed
    pub polygon_closed: bool,
    /// Polygon rescaling skips an axis whose old extent is within this of zero
    pub degenerate_extent_epsilon: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            color: Color::RED,
            polygon_closed: true,
            degenerate_extent_epsilon: DEFAULT_DEGENERATE_EXTENT_EPSILON,
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `draw2d_model=debug`
    pub filter: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shape defaults
    pub shapes: ShapeDefaults,
    /// Logging preferences
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let eps = self.shapes.degenerate_extent_epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(Error::config(format!(
                "degenerate_extent_epsilon must be finite and >= 0, got {}",
                eps
            )));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(Error::config("logging filter must not be empty"));
        }
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => Err(Error::config("Config file must be .json or .toml")),
        }
    }
}
