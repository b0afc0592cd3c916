//! Paint summary of the first selected element
//!
//! Values come from the style snapshot, so the highlight stroke never
//! shows up here.

use std::fmt;
use std::str::FromStr;

use crate::document::{ElementId, SvgDocument};
use crate::measure::{format_px, resolve_stroke, StyleSnapshots, NOT_AVAILABLE};

/// Color usable as a swatch, or `None` when the paint has no single visible
/// color (`none`, `currentcolor`, paint servers, fully transparent or
/// invalid values).
///
/// Valid colors come back trimmed and lowercased.
pub fn normalize_color(value: &str) -> Option<String> {
    let v = value.trim().to_ascii_lowercase();
    if v.is_empty() || v == "none" || v == "currentcolor" || v.starts_with("url(") {
        return None;
    }
    match svgtypes::Color::from_str(&v) {
        Ok(color) if color.alpha > 0 => Some(v),
        Ok(_) => None,
        Err(err) => {
            tracing::trace!(value = %v, %err, "paint has no swatch color");
            None
        }
    }
}

/// One paint property as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct PaintInfo {
    /// The value as authored, or a placeholder
    pub text: String,
    /// Swatch color, `None` draws the "no color" pattern
    pub swatch: Option<String>,
}

impl PaintInfo {
    fn unavailable() -> Self {
        Self {
            text: NOT_AVAILABLE.to_string(),
            swatch: None,
        }
    }

    fn from_value(value: &str) -> Self {
        Self {
            text: value.to_string(),
            swatch: normalize_color(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inspector {
    pub fill: PaintInfo,
    pub stroke: PaintInfo,
    /// Formatted stroke width, placeholder when there is no stroke
    pub stroke_width: String,
}

impl Inspector {
    /// Panel state for an empty selection
    pub fn empty() -> Self {
        Self {
            fill: PaintInfo::unavailable(),
            stroke: PaintInfo::unavailable(),
            stroke_width: NOT_AVAILABLE.to_string(),
        }
    }

    /// Panel state for the first element of a selection
    pub fn for_selection(
        doc: &SvgDocument,
        selection: &[ElementId],
        snapshots: &StyleSnapshots<ElementId>,
    ) -> Self {
        let Some(&element) = selection.first() else {
            return Self::empty();
        };
        let snapshot = snapshots.get(element);
        let fill = snapshot.map_or("none", |s| s.fill.as_str());
        let stroke = snapshot.map_or("none", |s| s.stroke.as_str());

        let width = resolve_stroke(doc, element, snapshots).width();
        let stroke_width = if width > 0.0 {
            format_px(width)
        } else {
            NOT_AVAILABLE.to_string()
        };

        Self {
            fill: PaintInfo::from_value(fill),
            stroke: PaintInfo::from_value(stroke),
            stroke_width,
        }
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Inspector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let swatch = |p: &PaintInfo| p.swatch.clone().unwrap_or_else(|| "no color".to_string());
        writeln!(f, "fill:         {} ({})", self.fill.text, swatch(&self.fill))?;
        writeln!(f, "stroke:       {} ({})", self.stroke.text, swatch(&self.stroke))?;
        writeln!(f, "stroke width: {}", self.stroke_width)
    }
}
