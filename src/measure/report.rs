//! Measurement output for the current selection
//!
//! A report is rebuilt from scratch on every request. All geometry is in
//! root space; turning it into device pixels is the overlay's job.

use std::fmt;

use crate::geometry::{Root, RootPoint, RootRect, Segment};

use super::adjust::exclude_stroke;
use super::project::project;
use super::relation::{relate, Relation};
use super::scene::Scene;
use super::stroke::{resolve_stroke, StrokeInfo, StyleSnapshots};

/// Placeholder for values that cannot be shown
pub const NOT_AVAILABLE: &str = "—";

/// Round half toward positive infinity and append `px`
pub fn format_px(n: f64) -> String {
    if !n.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = (n + 0.5).floor();
    // Avoid printing "-0px"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.0}px", rounded)
}

/// A labelled segment to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub segment: Segment<Root>,
    pub label: String,
}

impl Annotation {
    pub fn new(segment: Segment<Root>, length: f64) -> Self {
        Self {
            segment,
            label: format_px(length),
        }
    }
}

/// Text anchored at a root-space point
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLabel {
    /// Bottom-edge midpoint of the measured rectangle
    pub anchor: RootPoint,
    pub text: String,
}

/// Size and edge offsets of a single element
#[derive(Debug, Clone, PartialEq)]
pub struct ElementReport<E> {
    pub element: E,
    /// Projected geometry, stroke not yet removed
    pub raw: RootRect,
    pub stroke: StrokeInfo,
    /// Design geometry with the stroke excluded
    pub rect: RootRect,
    pub size: SizeLabel,
    /// From the canvas left edge to the rectangle, at its vertical middle
    pub left_offset: Annotation,
    /// From the canvas top edge to the rectangle, at its horizontal middle
    pub top_offset: Annotation,
}

/// Relation between the first two selected elements
#[derive(Debug, Clone, PartialEq)]
pub struct PairReport<E> {
    pub second: E,
    /// Stroke-excluded rectangle of the second element
    pub second_rect: RootRect,
    pub relation: Relation,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report<E> {
    pub primary: Option<ElementReport<E>>,
    pub pair: Option<PairReport<E>>,
}

impl<E> Report<E> {
    pub fn empty() -> Self {
        Self {
            primary: None,
            pair: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Every labelled segment in drawing order
    pub fn annotations(&self) -> Vec<&Annotation> {
        let mut out = Vec::new();
        if let Some(primary) = &self.primary {
            out.push(&primary.left_offset);
            out.push(&primary.top_offset);
        }
        if let Some(pair) = &self.pair {
            out.extend(pair.annotations.iter());
        }
        out
    }
}

impl<E> Default for Report<E> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Stroke-excluded rectangle of one element
pub fn measured_rect<S: Scene>(
    scene: &S,
    element: S::Element,
    snapshots: &StyleSnapshots<S::Element>,
) -> (RootRect, StrokeInfo, RootRect) {
    let raw = project(scene, element);
    let stroke = resolve_stroke(scene, element, snapshots);
    let rect = exclude_stroke(&raw, &stroke);
    (raw, stroke, rect)
}

/// Size label and canvas-edge offsets for one element
pub fn measure_element<S: Scene>(
    scene: &S,
    element: S::Element,
    snapshots: &StyleSnapshots<S::Element>,
) -> ElementReport<S::Element> {
    let (raw, stroke, rect) = measured_rect(scene, element, snapshots);
    let canvas = scene.canvas();
    let mid = rect.center();

    let left_offset = Annotation::new(
        Segment::new(RootPoint::new(canvas.left, mid.y), RootPoint::new(rect.left, mid.y)),
        rect.left - canvas.left,
    );
    let top_offset = Annotation::new(
        Segment::new(RootPoint::new(mid.x, canvas.top), RootPoint::new(mid.x, rect.top)),
        rect.top - canvas.top,
    );

    tracing::debug!(?element, %raw, %rect, stroke = stroke.width(), "measured element");

    ElementReport {
        element,
        raw,
        stroke,
        rect,
        size: SizeLabel {
            anchor: RootPoint::new(mid.x, rect.bottom()),
            text: format!("{} × {}", format_px(rect.width()), format_px(rect.height())),
        },
        left_offset,
        top_offset,
    }
}

/// Measure an ordered selection.
///
/// The first element gets a size report; when at least two are selected the
/// first two are related. Further elements are ignored.
pub fn measure_selection<S: Scene>(
    scene: &S,
    selection: &[S::Element],
    snapshots: &StyleSnapshots<S::Element>,
) -> Report<S::Element> {
    let Some(&first) = selection.first() else {
        return Report::empty();
    };
    let primary = measure_element(scene, first, snapshots);

    let pair = selection.get(1).map(|&second| {
        let (_, _, second_rect) = measured_rect(scene, second, snapshots);
        let relation = relate(&primary.rect, &second_rect);
        let annotations = relation
            .gaps()
            .into_iter()
            .map(|gap| Annotation::new(gap.segment, gap.length))
            .collect();
        tracing::debug!(relation = relation.kind(), "related selection pair");
        PairReport {
            second,
            second_rect,
            relation,
            annotations,
        }
    });

    Report {
        primary: Some(primary),
        pair,
    }
}

impl<E: fmt::Debug> fmt::Display for Report<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(primary) = &self.primary else {
            return writeln!(f, "nothing selected");
        };
        writeln!(f, "element {:?}", primary.element)?;
        writeln!(f, "  box:    {}", primary.rect)?;
        writeln!(f, "  size:   {}", primary.size.text)?;
        writeln!(f, "  left:   {}", primary.left_offset.label)?;
        writeln!(f, "  top:    {}", primary.top_offset.label)?;
        if let Some(pair) = &self.pair {
            writeln!(f, "pair with {:?}: {}", pair.second, pair.relation)?;
            let names: &[&str] = match pair.relation {
                Relation::Containment { .. } => &["left", "right", "top", "bottom"],
                _ => &["gap"],
            };
            for (name, annotation) in names.iter().zip(&pair.annotations) {
                writeln!(f, "  {:<7} {}", format!("{}:", name), annotation.label)?;
            }
        }
        Ok(())
    }
}
