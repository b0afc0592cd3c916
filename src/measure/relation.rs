//! Pairwise spatial relation between two root-space rectangles
//!
//! Classification priority:
//! 1. containment (either rectangle encloses the other)
//! 2. horizontal separation
//! 3. vertical separation
//! 4. overlap, measured center to center with a zero length
//!
//! Containment comes first because nested boxes are neither horizontally
//! nor vertically separated, and four gaps say more than a center line.

use std::fmt;

use crate::geometry::{Root, RootPoint, RootRect, Segment};

/// A measured distance and the root-space segment that shows it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gap {
    pub segment: Segment<Root>,
    pub length: f64,
}

impl Gap {
    fn new(from: RootPoint, to: RootPoint, length: f64) -> Self {
        Self {
            segment: Segment::new(from, to),
            length,
        }
    }
}

/// Inner-to-outer distances on each side of a contained rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainmentGaps {
    pub left: Gap,
    pub right: Gap,
    pub top: Gap,
    pub bottom: Gap,
}

impl ContainmentGaps {
    pub fn iter(&self) -> impl Iterator<Item = &Gap> {
        [&self.left, &self.right, &self.top, &self.bottom].into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation {
    /// One rectangle encloses the other
    Containment {
        outer: RootRect,
        inner: RootRect,
        gaps: ContainmentGaps,
    },
    /// Facing vertical edges, measured at the middle of the shared y-range
    HorizontalGap(Gap),
    /// Facing horizontal edges, measured at the middle of the shared x-range
    VerticalGap(Gap),
    /// Overlapping without nesting: no clean gap exists
    CenterToCenter(Gap),
}

impl Relation {
    /// Every gap to draw, in a stable order
    pub fn gaps(&self) -> Vec<&Gap> {
        match self {
            Relation::Containment { gaps, .. } => gaps.iter().collect(),
            Relation::HorizontalGap(gap)
            | Relation::VerticalGap(gap)
            | Relation::CenterToCenter(gap) => vec![gap],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Relation::Containment { .. } => "containment",
            Relation::HorizontalGap(_) => "horizontal gap",
            Relation::VerticalGap(_) => "vertical gap",
            Relation::CenterToCenter(_) => "overlap",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// Classify two rectangles and compute the geometry to display
pub fn relate(a: &RootRect, b: &RootRect) -> Relation {
    let separated_x = a.right() < b.left || b.right() < a.left;
    let separated_y = a.bottom() < b.top || b.bottom() < a.top;

    match (enclosing_pair(a, b), separated_x, separated_y) {
        (Some((outer, inner)), _, _) => containment(outer, inner),
        (None, true, _) => Relation::HorizontalGap(horizontal_gap(a, b)),
        (None, false, true) => Relation::VerticalGap(vertical_gap(a, b)),
        (None, false, false) => Relation::CenterToCenter(Gap::new(a.center(), b.center(), 0.0)),
    }
}

/// `(outer, inner)` when one rectangle encloses the other
fn enclosing_pair<'r>(a: &'r RootRect, b: &'r RootRect) -> Option<(&'r RootRect, &'r RootRect)> {
    if a.encloses(b) {
        Some((a, b))
    } else if b.encloses(a) {
        Some((b, a))
    } else {
        None
    }
}

fn containment(outer: &RootRect, inner: &RootRect) -> Relation {
    let mid = inner.center();
    let gaps = ContainmentGaps {
        left: Gap::new(
            RootPoint::new(outer.left, mid.y),
            RootPoint::new(inner.left, mid.y),
            (inner.left - outer.left).max(0.0),
        ),
        right: Gap::new(
            RootPoint::new(inner.right(), mid.y),
            RootPoint::new(outer.right(), mid.y),
            (outer.right() - inner.right()).max(0.0),
        ),
        top: Gap::new(
            RootPoint::new(mid.x, outer.top),
            RootPoint::new(mid.x, inner.top),
            (inner.top - outer.top).max(0.0),
        ),
        bottom: Gap::new(
            RootPoint::new(mid.x, inner.bottom()),
            RootPoint::new(mid.x, outer.bottom()),
            (outer.bottom() - inner.bottom()).max(0.0),
        ),
    };
    Relation::Containment {
        outer: *outer,
        inner: *inner,
        gaps,
    }
}

fn horizontal_gap(a: &RootRect, b: &RootRect) -> Gap {
    let (left, right) = if a.left < b.left { (a, b) } else { (b, a) };
    let x1 = left.right();
    let x2 = right.left;
    let y = (left.top.max(right.top) + left.bottom().min(right.bottom())) / 2.0;
    Gap::new(RootPoint::new(x1, y), RootPoint::new(x2, y), (x2 - x1).max(0.0))
}

fn vertical_gap(a: &RootRect, b: &RootRect) -> Gap {
    let (upper, lower) = if a.top < b.top { (a, b) } else { (b, a) };
    let y1 = upper.bottom();
    let y2 = lower.top;
    let x = (upper.left.max(lower.left) + upper.right().min(lower.right())) / 2.0;
    Gap::new(RootPoint::new(x, y1), RootPoint::new(x, y2), (y2 - y1).max(0.0))
}
