//! 2D affine transforms between coordinate spaces
//!
//! An `Affine<Src, Dst>` is the 2×3 matrix
//!
//! ```text
//! | a c e |
//! | b d f |
//! ```
//!
//! mapping points of `Src` into `Dst`, using the SVG convention: positive
//! rotation angles turn clockwise because the y-axis points down.
//!
//! Composition is only possible when the spaces line up: `m.then(n)` requires
//! `m: Affine<A, B>` and `n: Affine<B, C>`, producing `Affine<A, C>`.

use std::marker::PhantomData;

use super::types::{Point, Rect, Space};

/// Determinants with a smaller magnitude are treated as singular
const SINGULAR_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine<Src: Space, Dst: Space> {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    spaces: PhantomData<(Src, Dst)>,
}

impl<Src: Space, Dst: Space> Affine<Src, Dst> {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            spaces: PhantomData,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    pub fn translate(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, degrees clockwise
    pub fn rotate(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn skew_x(degrees: f64) -> Self {
        Self::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skew_y(degrees: f64) -> Self {
        Self::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Apply `self` first, then `next`
    pub fn then<Next: Space>(self, next: Affine<Dst, Next>) -> Affine<Src, Next> {
        Affine::new(
            next.a * self.a + next.c * self.b,
            next.b * self.a + next.d * self.b,
            next.a * self.c + next.c * self.d,
            next.b * self.c + next.d * self.d,
            next.a * self.e + next.c * self.f + next.e,
            next.b * self.e + next.d * self.f + next.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse mapping, or `None` when the matrix is singular or not finite
    pub fn inverse(&self) -> Option<Affine<Dst, Src>> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine::new(
            self.d * inv,
            -self.b * inv,
            -self.c * inv,
            self.a * inv,
            (self.c * self.f - self.d * self.e) * inv,
            (self.b * self.e - self.a * self.f) * inv,
        ))
    }

    pub fn apply(&self, p: Point<Src>) -> Point<Dst> {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Axis-aligned bounds of a transformed rectangle.
    ///
    /// All four corners are mapped: under rotation or skew the two-corner
    /// shortcut underestimates the hull.
    pub fn transform_rect(&self, rect: &Rect<Src>) -> Rect<Dst> {
        let corners = rect.corners().map(|p| self.apply(p));
        Rect::from_points(corners).unwrap_or_else(Rect::zero)
    }

    /// Length of the image of the unit x-vector, `hypot(a, b)`
    pub fn linear_scale(&self) -> f64 {
        self.a.hypot(self.b)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Same coefficients, different space tags
    pub(crate) fn retag<S: Space, T: Space>(self) -> Affine<S, T> {
        Affine::new(self.a, self.b, self.c, self.d, self.e, self.f)
    }

    /// Coefficients as an SVG `matrix(...)` function
    pub fn to_svg_matrix(&self) -> String {
        format!(
            "matrix({} {} {} {} {} {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}
