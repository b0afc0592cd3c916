//! Measurement configuration
//!
//! Settings are read from TOML. Every key is optional; omitted keys keep
//! the values of [`DEFAULT_CONFIG`].

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::document::Viewport;
use crate::overlay::OverlayConfig;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The built-in configuration, as TOML
pub const DEFAULT_CONFIG: &str = r##"
[viewport]
# Device area the canvas is fitted into (xMinYMin meet)
width = 1280.0
height = 800.0
scroll_x = 0.0
scroll_y = 0.0

[highlight]
# Stroke color applied to selected elements
color = "#F4A12D"

[export]
# Extra room around the stroke-inclusive crop, in root units
padding = 2.0

[overlay]
class_prefix = "sm-"
pretty_print = true
standalone = true
dot_radius = 3.0
size_label_offset = 14.0
"##;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub color: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            color: "#F4A12D".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub padding: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { padding: 2.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub viewport: Viewport,
    pub highlight: HighlightConfig,
    pub export: ExportConfig,
    pub overlay: OverlayConfig,
}

impl MeasureConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_highlight_color(mut self, color: impl Into<String>) -> Self {
        self.highlight.color = color.into();
        self
    }

    pub fn with_export_padding(mut self, padding: f64) -> Self {
        self.export.padding = padding;
        self
    }

    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }
}
