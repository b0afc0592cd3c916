//! Stroke-aware rectangle adjustment
//!
//! Strokes are centered on the outline: half the thickness lies inside the
//! nominal geometry, half outside.

use crate::geometry::RootRect;

use super::stroke::StrokeInfo;

/// Design geometry with the stroke removed.
///
/// Each side moves inward by half the stroke width. When the stroke is
/// thicker than the box along an axis, that axis collapses to zero size
/// centered on the raw box rather than landing outside it.
pub fn exclude_stroke(rect: &RootRect, stroke: &StrokeInfo) -> RootRect {
    let sw = stroke.width();
    let inset_x = sw.min(rect.width()) / 2.0;
    let inset_y = sw.min(rect.height()) / 2.0;
    RootRect::new(
        rect.left + inset_x,
        rect.top + inset_y,
        rect.width() - sw,
        rect.height() - sw,
    )
}

/// Painted extent including the stroke, for crop boxes that must not clip it
pub fn include_stroke(rect: &RootRect, stroke: &StrokeInfo) -> RootRect {
    rect.inflate(stroke.width() / 2.0)
}
