//! Effective stroke thickness and the pre-highlight style snapshot
//!
//! Selection highlighting repaints an element's stroke, so measurements read
//! a snapshot of the paint state taken when the element was first selected.
//! Snapshots live in an explicit side table owned by the selection and are
//! written at most once per element.

use std::collections::HashMap;
use std::hash::Hash;

use crate::parser::parse_float_prefix;

use super::scene::Scene;

/// Stroke presence and thickness in root units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeInfo {
    color_present: bool,
    width: f64,
}

impl StrokeInfo {
    /// Build stroke info; absent color forces zero width, negative or
    /// non-finite widths become zero
    pub fn new(color_present: bool, width: f64) -> Self {
        let width = if color_present && width.is_finite() {
            width.max(0.0)
        } else {
            0.0
        };
        Self {
            color_present,
            width,
        }
    }

    /// No visible stroke
    pub fn none() -> Self {
        Self::new(false, 0.0)
    }

    pub fn color_present(&self) -> bool {
        self.color_present
    }

    /// Thickness in root units
    pub fn width(&self) -> f64 {
        self.width
    }
}

/// Paint state captured before any highlight override
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    /// Computed fill (`none` when the cascade yields nothing)
    pub fill: String,
    /// Computed stroke (`none` when the cascade yields nothing)
    pub stroke: String,
    /// Computed stroke width in device pixels
    pub stroke_width_px: f64,
    /// Device pixels per root unit when the width was captured
    pub px_per_unit: f64,
    /// The element's own `stroke-width` attribute, if any
    pub stroke_width_attr: Option<String>,
    /// The element's own `stroke` attribute, if any
    pub stroke_attr: Option<String>,
}

impl StyleSnapshot {
    pub fn capture<S: Scene>(scene: &S, element: S::Element) -> Self {
        let style = scene.computed_style(element);
        let non_empty = |s: String| if s.trim().is_empty() { "none".to_string() } else { s };
        Self {
            fill: non_empty(style.fill),
            stroke: non_empty(style.stroke),
            stroke_width_px: style.stroke_width,
            px_per_unit: scene.root_to_screen().map_or(1.0, |m| m.linear_scale()),
            stroke_width_attr: scene.attribute(element, "stroke-width").map(str::to_string),
            stroke_attr: scene.attribute(element, "stroke").map(str::to_string),
        }
    }
}

/// Side table of style snapshots keyed by element
#[derive(Debug, Clone)]
pub struct StyleSnapshots<E> {
    snapshots: HashMap<E, StyleSnapshot>,
}

impl<E: Copy + Eq + Hash> StyleSnapshots<E> {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
        }
    }

    /// Capture a snapshot unless one already exists.
    ///
    /// Returns true when a new snapshot was written.
    pub fn record<S: Scene<Element = E>>(&mut self, scene: &S, element: E) -> bool {
        if self.snapshots.contains_key(&element) {
            return false;
        }
        self.snapshots
            .insert(element, StyleSnapshot::capture(scene, element));
        true
    }

    pub fn get(&self, element: E) -> Option<&StyleSnapshot> {
        self.snapshots.get(&element)
    }

    pub fn contains(&self, element: E) -> bool {
        self.snapshots.contains_key(&element)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl<E: Copy + Eq + Hash> Default for StyleSnapshots<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// True for paint values that draw nothing
pub fn is_no_paint(value: &str) -> bool {
    let v = value.trim();
    v.eq_ignore_ascii_case("none") || v.eq_ignore_ascii_case("transparent")
}

/// Effective stroke of an element in root units.
///
/// Without a snapshot the element counts as unstroked. An explicit
/// `stroke-width` attribute is taken as-is in user units; otherwise the
/// computed device-pixel width is divided by the root's device pixels per
/// root unit, both taken when the snapshot was captured.
pub fn resolve_stroke<S: Scene>(
    scene: &S,
    element: S::Element,
    snapshots: &StyleSnapshots<S::Element>,
) -> StrokeInfo {
    let Some(snapshot) = snapshots.get(element) else {
        return StrokeInfo::none();
    };
    if is_no_paint(&snapshot.stroke) {
        return StrokeInfo::none();
    }

    let attr = snapshot
        .stroke_width_attr
        .as_deref()
        .or_else(|| scene.attribute(element, "stroke-width"));
    if let Some(attr) = attr {
        let width = parse_float_prefix(attr).unwrap_or(0.0);
        return StrokeInfo::new(true, width);
    }

    let px_per_unit = snapshot.px_per_unit;
    let width = if px_per_unit > 0.0 && px_per_unit.is_finite() {
        snapshot.stroke_width_px / px_per_unit
    } else {
        0.0
    };
    StrokeInfo::new(true, width)
}
