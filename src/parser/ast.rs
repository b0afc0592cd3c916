//! Parsed forms of SVG attribute values

use crate::geometry::{Affine, LocalPoint, Space};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// One function of a `transform` attribute list
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Matrix([f64; 6]),
    Translate { tx: f64, ty: f64 },
    Scale { sx: f64, sy: f64 },
    /// Angle in degrees, optionally about a center point
    Rotate { angle: f64, center: Option<(f64, f64)> },
    SkewX(f64),
    SkewY(f64),
}

impl TransformOp {
    /// The matrix this function contributes
    pub fn to_affine<S: Space>(&self) -> Affine<S, S> {
        match *self {
            TransformOp::Matrix([a, b, c, d, e, f]) => Affine::new(a, b, c, d, e, f),
            TransformOp::Translate { tx, ty } => Affine::translate(tx, ty),
            TransformOp::Scale { sx, sy } => Affine::scale(sx, sy),
            TransformOp::Rotate {
                angle,
                center: Some((cx, cy)),
            } => Affine::<S, S>::translate(-cx, -cy)
                .then(Affine::<S, S>::rotate(angle))
                .then(Affine::translate(cx, cy)),
            TransformOp::Rotate {
                angle,
                center: None,
            } => Affine::rotate(angle),
            TransformOp::SkewX(angle) => Affine::skew_x(angle),
            TransformOp::SkewY(angle) => Affine::skew_y(angle),
        }
    }
}

/// Compose a transform list.
///
/// The leftmost function is outermost, so it is applied last to a point.
pub fn compose<S: Space>(ops: &[TransformOp]) -> Affine<S, S> {
    ops.iter()
        .rev()
        .fold(Affine::identity(), |acc, op| acc.then(op.to_affine()))
}

/// Unit of a CSS/SVG length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Unitless user units
    None,
    Px,
    Pt,
    Pc,
    Mm,
    Cm,
    In,
    Em,
    Ex,
    Percent,
}

impl LengthUnit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "px" => Some(LengthUnit::Px),
            "pt" => Some(LengthUnit::Pt),
            "pc" => Some(LengthUnit::Pc),
            "mm" => Some(LengthUnit::Mm),
            "cm" => Some(LengthUnit::Cm),
            "in" => Some(LengthUnit::In),
            "em" => Some(LengthUnit::Em),
            "ex" => Some(LengthUnit::Ex),
            _ => None,
        }
    }
}

/// A length with its unit, as authored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

/// Default font size used to resolve `em`/`ex`
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

impl Length {
    pub fn user(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::None,
        }
    }

    /// Convert to user units (CSS px); percentages resolve against `reference`
    pub fn to_user_units(&self, reference: f64) -> f64 {
        let v = self.value;
        match self.unit {
            LengthUnit::None | LengthUnit::Px => v,
            LengthUnit::Pt => v * 4.0 / 3.0,
            LengthUnit::Pc => v * 16.0,
            LengthUnit::Mm => v * 96.0 / 25.4,
            LengthUnit::Cm => v * 96.0 / 2.54,
            LengthUnit::In => v * 96.0,
            LengthUnit::Em => v * DEFAULT_FONT_SIZE,
            LengthUnit::Ex => v * DEFAULT_FONT_SIZE / 2.0,
            LengthUnit::Percent => v * reference / 100.0,
        }
    }
}

/// One absolute path segment after normalizing relative and shorthand commands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(LocalPoint),
    LineTo(LocalPoint),
    CubicTo {
        ctrl1: LocalPoint,
        ctrl2: LocalPoint,
        to: LocalPoint,
    },
    QuadTo {
        ctrl: LocalPoint,
        to: LocalPoint,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: LocalPoint,
    },
    ClosePath,
}
