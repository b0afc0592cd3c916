//! Core geometric types tagged by coordinate space

use std::fmt;
use std::marker::PhantomData;

/// Marker trait for coordinate spaces
pub trait Space: Copy + fmt::Debug + PartialEq {}

/// An element's own user space, before its `transform` attribute applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Local;

/// The document root's user space (viewBox units)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root;

/// Device pixels of the viewport the root is fitted into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen;

impl Space for Local {}
impl Space for Root {}
impl Space for Screen {}

/// A 2D point in coordinate space `S`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S: Space> {
    pub x: f64,
    pub y: f64,
    space: PhantomData<S>,
}

pub type LocalPoint = Point<Local>;
pub type RootPoint = Point<Root>;
pub type ScreenPoint = Point<Screen>;

impl<S: Space> Point<S> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Euclidean distance to another point in the same space
    pub fn distance_to(&self, other: Point<S>) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned rectangle in coordinate space `S`.
///
/// Width and height are never negative: constructors clamp them to zero,
/// and a NaN extent also collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<S: Space = Root> {
    pub left: f64,
    pub top: f64,
    width: f64,
    height: f64,
    space: PhantomData<S>,
}

pub type LocalRect = Rect<Local>;
pub type RootRect = Rect<Root>;

impl<S: Space> Rect<S> {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
            space: PhantomData,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Smallest rectangle containing every point, or `None` for no points
    pub fn from_points(points: impl IntoIterator<Item = Point<S>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point<S> {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Point<S>; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ]
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains(&self, point: Point<S>) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Check if this rectangle fully encloses another (shared edges allowed)
    pub fn encloses(&self, other: &Rect<S>) -> bool {
        self.left <= other.left
            && self.right() >= other.right()
            && self.top <= other.top
            && self.bottom() >= other.bottom()
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Rect<S>) -> Rect<S> {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Grow by `amount` on every side. Negative amounts shrink, clamping at zero size.
    pub fn inflate(&self, amount: f64) -> Rect<S> {
        Rect::new(
            self.left - amount,
            self.top - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }
}

impl<S: Space> fmt::Display for Rect<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={:.2} y={:.2} w={:.2} h={:.2}",
            self.left, self.top, self.width, self.height
        )
    }
}

/// A straight segment between two points of the same space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<S: Space> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Space> Segment<S> {
    pub fn new(from: Point<S>, to: Point<S>) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f64 {
        self.from.distance_to(self.to)
    }

    pub fn midpoint(&self) -> Point<S> {
        Point::new(
            (self.from.x + self.to.x) / 2.0,
            (self.from.y + self.to.y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_extent_clamps_to_zero() {
        let r = RootRect::new(10.0, 10.0, -5.0, -1.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
        assert_eq!(r.right(), 10.0);
    }

    #[test]
    fn test_nan_extent_clamps_to_zero() {
        let r = RootRect::new(0.0, 0.0, f64::NAN, 4.0);
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 4.0);
    }

    #[test]
    fn test_from_points_hull() {
        let r = RootRect::from_points([
            RootPoint::new(3.0, -1.0),
            RootPoint::new(-2.0, 4.0),
            RootPoint::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(r, RootRect::new(-2.0, -1.0, 5.0, 5.0));
        assert!(RootRect::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_encloses_shared_edges() {
        let outer = RootRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.encloses(&RootRect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.encloses(&RootRect::new(40.0, 40.0, 20.0, 20.0)));
        assert!(!outer.encloses(&RootRect::new(90.0, 40.0, 20.0, 20.0)));
    }

    #[test]
    fn test_union_and_inflate() {
        let a = RootRect::new(0.0, 0.0, 10.0, 10.0);
        let b = RootRect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), RootRect::new(0.0, 0.0, 30.0, 15.0));
        assert_eq!(a.inflate(2.0), RootRect::new(-2.0, -2.0, 14.0, 14.0));
        assert_eq!(a.inflate(-6.0).width(), 0.0);
    }

    #[test]
    fn test_segment_midpoint_and_length() {
        let s = Segment::new(RootPoint::new(0.0, 0.0), RootPoint::new(6.0, 8.0));
        assert_eq!(s.length(), 10.0);
        assert_eq!(s.midpoint(), RootPoint::new(3.0, 4.0));
    }
}
