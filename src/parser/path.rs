//! Path data (`d` attribute) normalization and geometric bounds

use std::f64::consts::{PI, TAU};

use svgtypes::PathParser;

use crate::geometry::{LocalPoint, LocalRect};
use crate::parser::ast::PathSegment;
use crate::ParseError;

/// Result of parsing path data.
///
/// Path data is rendered up to the first error, so the segments before an
/// error are still meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPath {
    pub segments: Vec<PathSegment>,
    pub error: Option<ParseError>,
}

/// Parse path data into absolute segments
pub fn parse_path(d: &str) -> ParsedPath {
    let mut normalizer = Normalizer::default();
    let mut segments = Vec::new();
    for item in PathParser::from(d) {
        match item {
            Ok(segment) => segments.push(normalizer.push(segment)),
            Err(err) => {
                return ParsedPath {
                    segments,
                    error: Some(ParseError::syntax(0..d.len(), format!("Invalid path data: {}", err))),
                };
            }
        }
    }
    ParsedPath {
        segments,
        error: None,
    }
}

/// Pen state needed to turn relative and shorthand commands into absolute
/// segments
#[derive(Default)]
struct Normalizer {
    current: (f64, f64),
    subpath_start: (f64, f64),
    // Reflection sources for S/s and T/t
    last_cubic_ctrl: Option<(f64, f64)>,
    last_quad_ctrl: Option<(f64, f64)>,
}

impl Normalizer {
    fn push(&mut self, segment: svgtypes::PathSegment) -> PathSegment {
        use svgtypes::PathSegment as Svg;

        let current = self.current;
        let offset = |abs: bool, x: f64, y: f64| {
            if abs {
                (x, y)
            } else {
                (current.0 + x, current.1 + y)
            }
        };
        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;

        let (out, to) = match segment {
            Svg::MoveTo { abs, x, y } => {
                let to = offset(abs, x, y);
                self.subpath_start = to;
                (PathSegment::MoveTo(pt(to)), to)
            }
            Svg::LineTo { abs, x, y } => {
                let to = offset(abs, x, y);
                (PathSegment::LineTo(pt(to)), to)
            }
            Svg::HorizontalLineTo { abs, x } => {
                let to = (if abs { x } else { current.0 + x }, current.1);
                (PathSegment::LineTo(pt(to)), to)
            }
            Svg::VerticalLineTo { abs, y } => {
                let to = (current.0, if abs { y } else { current.1 + y });
                (PathSegment::LineTo(pt(to)), to)
            }
            Svg::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c2 = offset(abs, x2, y2);
                let to = offset(abs, x, y);
                cubic_ctrl = Some(c2);
                (cubic(offset(abs, x1, y1), c2, to), to)
            }
            Svg::SmoothCurveTo { abs, x2, y2, x, y } => {
                let c2 = offset(abs, x2, y2);
                let to = offset(abs, x, y);
                cubic_ctrl = Some(c2);
                (cubic(reflect(self.last_cubic_ctrl, current), c2, to), to)
            }
            Svg::Quadratic { abs, x1, y1, x, y } => {
                let c = offset(abs, x1, y1);
                let to = offset(abs, x, y);
                quad_ctrl = Some(c);
                (quad(c, to), to)
            }
            Svg::SmoothQuadratic { abs, x, y } => {
                let c = reflect(self.last_quad_ctrl, current);
                let to = offset(abs, x, y);
                quad_ctrl = Some(c);
                (quad(c, to), to)
            }
            Svg::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let to = offset(abs, x, y);
                let arc = PathSegment::ArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to: pt(to),
                };
                (arc, to)
            }
            Svg::ClosePath { .. } => (PathSegment::ClosePath, self.subpath_start),
        };

        self.current = to;
        self.last_cubic_ctrl = cubic_ctrl;
        self.last_quad_ctrl = quad_ctrl;
        out
    }
}

fn pt((x, y): (f64, f64)) -> LocalPoint {
    LocalPoint::new(x, y)
}

fn cubic(c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) -> PathSegment {
    PathSegment::CubicTo {
        ctrl1: pt(c1),
        ctrl2: pt(c2),
        to: pt(to),
    }
}

fn quad(c: (f64, f64), to: (f64, f64)) -> PathSegment {
    PathSegment::QuadTo {
        ctrl: pt(c),
        to: pt(to),
    }
}

/// Reflect the previous control point about the current point
fn reflect(ctrl: Option<(f64, f64)>, current: (f64, f64)) -> (f64, f64) {
    match ctrl {
        Some((cx, cy)) => (2.0 * current.0 - cx, 2.0 * current.1 - cy),
        None => current,
    }
}

/// Tight bounds of the path geometry (control points excluded)
pub fn path_bounds(segments: &[PathSegment]) -> Option<LocalRect> {
    let mut points: Vec<LocalPoint> = Vec::new();
    let mut current = LocalPoint::new(0.0, 0.0);
    let mut subpath_start = current;

    for segment in segments {
        match *segment {
            PathSegment::MoveTo(p) => {
                points.push(p);
                current = p;
                subpath_start = p;
            }
            PathSegment::LineTo(p) => {
                points.push(p);
                current = p;
            }
            PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                points.push(to);
                for t in cubic_extrema(current.x, ctrl1.x, ctrl2.x, to.x)
                    .into_iter()
                    .chain(cubic_extrema(current.y, ctrl1.y, ctrl2.y, to.y))
                {
                    points.push(cubic_at(current, ctrl1, ctrl2, to, t));
                }
                current = to;
            }
            PathSegment::QuadTo { ctrl, to } => {
                points.push(to);
                for t in [
                    quad_extremum(current.x, ctrl.x, to.x),
                    quad_extremum(current.y, ctrl.y, to.y),
                ]
                .into_iter()
                .flatten()
                {
                    points.push(quad_at(current, ctrl, to, t));
                }
                current = to;
            }
            PathSegment::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => {
                points.extend(arc_extrema(
                    current,
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    to,
                ));
                points.push(to);
                current = to;
            }
            PathSegment::ClosePath => current = subpath_start,
        }
    }

    LocalRect::from_points(points)
}

/// Parameters in (0, 1) where a cubic's derivative vanishes along one axis
fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> Vec<f64> {
    // B'(t)/3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    let roots = if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            vec![]
        } else {
            vec![-c / b]
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            vec![]
        } else {
            let sq = disc.sqrt();
            vec![(-b + sq) / (2.0 * a), (-b - sq) / (2.0 * a)]
        }
    };
    roots.into_iter().filter(|t| *t > 0.0 && *t < 1.0).collect()
}

fn quad_extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    let denom = p0 - 2.0 * p1 + p2;
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = (p0 - p1) / denom;
    (t > 0.0 && t < 1.0).then_some(t)
}

fn cubic_at(p0: LocalPoint, p1: LocalPoint, p2: LocalPoint, p3: LocalPoint, t: f64) -> LocalPoint {
    let mt = 1.0 - t;
    let w0 = mt * mt * mt;
    let w1 = 3.0 * mt * mt * t;
    let w2 = 3.0 * mt * t * t;
    let w3 = t * t * t;
    LocalPoint::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
    )
}

fn quad_at(p0: LocalPoint, p1: LocalPoint, p2: LocalPoint, t: f64) -> LocalPoint {
    let mt = 1.0 - t;
    LocalPoint::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// Points where an elliptical arc reaches its horizontal or vertical
/// extremes, via the endpoint-to-center conversion of SVG 1.1 appendix F.6.
/// The endpoints themselves are not included.
fn arc_extrema(
    from: LocalPoint,
    rx: f64,
    ry: f64,
    x_axis_rotation: f64,
    large_arc: bool,
    sweep: bool,
    to: LocalPoint,
) -> Vec<LocalPoint> {
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx == 0.0 || ry == 0.0 || from == to {
        // Degenerate arcs render as straight lines
        return vec![];
    }

    let (sin_phi, cos_phi) = x_axis_rotation.to_radians().sin_cos();
    let dx = (from.x - to.x) / 2.0;
    let dy = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx + sin_phi * dy;
    let y1p = -sin_phi * dx + cos_phi * dy;

    // Scale radii up if they cannot span the endpoints
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let num = rx * rx * ry * ry - rx * rx * y1p * y1p - ry * ry * x1p * x1p;
    let den = rx * rx * y1p * y1p + ry * ry * x1p * x1p;
    let mut coef = if den == 0.0 { 0.0 } else { (num / den).max(0.0).sqrt() };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let angle = |ux: f64, uy: f64, vx: f64, vy: f64| (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
    let theta1 = angle(1.0, 0.0, (x1p - cxp) / rx, (y1p - cyp) / ry);
    let mut delta = angle(
        (x1p - cxp) / rx,
        (y1p - cyp) / ry,
        (-x1p - cxp) / rx,
        (-y1p - cyp) / ry,
    );
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    // dx/dθ = 0 and dy/dθ = 0, each with its opposite point
    let theta_x = (-ry * sin_phi).atan2(rx * cos_phi);
    let theta_y = (ry * cos_phi).atan2(rx * sin_phi);
    let swept = |theta: f64| {
        let along = if delta >= 0.0 {
            (theta - theta1).rem_euclid(TAU)
        } else {
            (theta1 - theta).rem_euclid(TAU)
        };
        along <= delta.abs()
    };

    [theta_x, theta_x + PI, theta_y, theta_y + PI]
        .into_iter()
        .filter(|&theta| swept(theta))
        .map(|theta| {
            let (sin_t, cos_t) = theta.sin_cos();
            LocalPoint::new(
                cx + rx * cos_t * cos_phi - ry * sin_t * sin_phi,
                cy + rx * cos_t * sin_phi + ry * sin_t * cos_phi,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(d: &str) -> LocalRect {
        let parsed = parse_path(d);
        assert!(parsed.error.is_none(), "unexpected error: {:?}", parsed.error);
        path_bounds(&parsed.segments).unwrap()
    }

    #[test]
    fn test_relative_and_shorthand_lines() {
        let parsed = parse_path("m10 10 h20 v5 H0 z");
        assert_eq!(
            parsed.segments,
            vec![
                PathSegment::MoveTo(LocalPoint::new(10.0, 10.0)),
                PathSegment::LineTo(LocalPoint::new(30.0, 10.0)),
                PathSegment::LineTo(LocalPoint::new(30.0, 15.0)),
                PathSegment::LineTo(LocalPoint::new(0.0, 15.0)),
                PathSegment::ClosePath,
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let parsed = parse_path("M0 0 10 0 10 10");
        assert_eq!(parsed.segments.len(), 3);
        assert!(matches!(parsed.segments[1], PathSegment::LineTo(_)));
    }

    #[test]
    fn test_cubic_bounds_exclude_control_points() {
        // Symmetric hump: peak of the curve is at y = -75, controls at -100
        let r = bounds("M0 0 C0 -100 100 -100 100 0");
        assert!((r.top - -75.0).abs() < 1e-9, "top: got {}", r.top);
        assert_eq!(r.width(), 100.0);
    }

    #[test]
    fn test_quad_bounds() {
        let r = bounds("M0 0 Q50 100 100 0");
        assert!((r.height() - 50.0).abs() < 1e-9, "height: got {}", r.height());
    }

    #[test]
    fn test_arc_bounds_semicircle() {
        // Upper half of a circle of radius 50 centered at (50, 0)
        let r = bounds("M0 0 A50 50 0 0 1 100 0");
        assert!((r.top - -50.0).abs() < 1e-9, "top: got {}", r.top);
        assert!((r.bottom() - 0.0).abs() < 1e-9, "bottom: got {}", r.bottom());
        assert_eq!(r.width(), 100.0);
    }

    #[test]
    fn test_large_arc_reaches_true_extremes() {
        // Almost a full turn of a radius 1000 circle around the origin
        let r = bounds("M1000 0 A1000 1000 0 1 1 -994.88 -101.06");
        assert!((r.bottom() - 1000.0).abs() < 1e-2, "bottom: got {}", r.bottom());
        assert!((r.left - -1000.0).abs() < 1e-2, "left: got {}", r.left);
        assert!((r.top - -101.06).abs() < 1e-9, "top: got {}", r.top);
        assert!((r.height() - 1101.06).abs() < 1e-2, "height: got {}", r.height());
    }

    #[test]
    fn test_rotated_arc_extremes() {
        // Full ellipse split into two halves, rotated a quarter turn
        let r = bounds("M0 -40 A40 20 90 0 1 0 40 A40 20 90 0 1 0 -40");
        assert!((r.left - -20.0).abs() < 1e-9, "left: got {}", r.left);
        assert!((r.right() - 20.0).abs() < 1e-9, "right: got {}", r.right());
        assert!((r.top - -40.0).abs() < 1e-9, "top: got {}", r.top);
        assert!((r.height() - 80.0).abs() < 1e-9, "height: got {}", r.height());
    }

    #[test]
    fn test_smooth_curves_reflect_controls() {
        let parsed = parse_path("M0 0 C0 -10 10 -10 10 0 s10 10 10 0 T30 0");
        assert_eq!(
            parsed.segments[2],
            PathSegment::CubicTo {
                ctrl1: LocalPoint::new(10.0, 10.0),
                ctrl2: LocalPoint::new(20.0, 10.0),
                to: LocalPoint::new(20.0, 0.0),
            }
        );
        // T after a cubic has no quadratic control to reflect
        assert_eq!(
            parsed.segments[3],
            PathSegment::QuadTo {
                ctrl: LocalPoint::new(20.0, 0.0),
                to: LocalPoint::new(30.0, 0.0),
            }
        );
    }

    #[test]
    fn test_error_keeps_prefix() {
        let parsed = parse_path("M0 0 L10 10 L20");
        assert_eq!(parsed.segments.len(), 2);
        assert!(parsed.error.is_some());
    }

    #[test]
    fn test_must_start_with_moveto() {
        let parsed = parse_path("L10 10");
        assert!(parsed.segments.is_empty());
        assert!(parsed.error.is_some());
    }
}
