//! Configuration for the measurement overlay

use serde::Deserialize;

/// Configuration options for overlay SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Prefix for CSS class names (e.g., "sm-" for "sm-line")
    pub class_prefix: Option<String>,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Radius of the segment end dots, in screen pixels
    pub dot_radius: f64,

    /// Distance of the size label below the measured box, in screen pixels
    pub size_label_offset: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            class_prefix: Some("sm-".to_string()),
            pretty_print: true,
            standalone: true,
            dot_radius: 3.0,
            size_label_offset: 14.0,
        }
    }
}

impl OverlayConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_dot_radius(mut self, radius: f64) -> Self {
        self.dot_radius = radius;
        self
    }

    pub fn with_size_label_offset(mut self, offset: f64) -> Self {
        self.size_label_offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("sm-".to_string()));
        assert_eq!(config.dot_radius, 3.0);
        assert_eq!(config.size_label_offset, 14.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = OverlayConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_dot_radius(1.5)
            .with_size_label_offset(20.0);

        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.dot_radius, 1.5);
        assert_eq!(config.size_label_offset, 20.0);
        assert_eq!(OverlayConfig::new().without_class_prefix().class_prefix, None);
    }
}
