//! The boundary between the measurement engine and a document model

use std::fmt;
use std::hash::Hash;

use crate::geometry::{Affine, Local, LocalRect, Root, RootRect, Screen};

/// Paint state of an element as resolved by the style cascade
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    /// Computed `fill` value as authored (`none`, `#f00`, `url(#g)`, ...)
    pub fill: String,
    /// Computed `stroke` value as authored
    pub stroke: String,
    /// Computed `stroke-width` in device pixels, after the element's CTM
    pub stroke_width: f64,
}

impl Default for ComputedStyle {
    /// Initial values of the SVG paint properties
    fn default() -> Self {
        Self {
            fill: "black".to_string(),
            stroke: "none".to_string(),
            stroke_width: 1.0,
        }
    }
}

/// What the engine needs to read from a rendered document.
///
/// Every query is a synchronous read of already laid-out state.
pub trait Scene {
    /// Element handle; also the key of per-element side tables
    type Element: Copy + Eq + Hash + fmt::Debug;

    /// Geometric bounding box in the element's local space, stroke excluded
    fn local_bbox(&self, element: Self::Element) -> Option<LocalRect>;

    /// Local-to-device transform, `None` when the element is not rendered
    fn element_to_screen(&self, element: Self::Element) -> Option<Affine<Local, Screen>>;

    /// Root-to-device transform, `None` when no layout is available
    fn root_to_screen(&self) -> Option<Affine<Root, Screen>>;

    /// Raw attribute value as currently set on the element
    fn attribute(&self, element: Self::Element, name: &str) -> Option<&str>;

    /// Style-cascade result for the element's paint properties
    fn computed_style(&self, element: Self::Element) -> ComputedStyle;

    /// The canvas (root viewBox) in root space
    fn canvas(&self) -> RootRect;
}
