//! viewBox, preserveAspectRatio and the device viewport

use serde::Deserialize;

use crate::geometry::{Affine, Space};
use crate::parser::parse_number_list;

/// Intrinsic size used when a root declares neither viewBox nor size
pub const FALLBACK_WIDTH: f64 = 1000.0;
pub const FALLBACK_HEIGHT: f64 = 800.0;

/// The device area the document is displayed in, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Horizontal scroll offset of the content
    pub scroll_x: f64,
    /// Vertical scroll offset of the content
    pub scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_scroll(mut self, x: f64, y: f64) -> Self {
        self.scroll_x = x;
        self.scroll_y = y;
        self
    }
}

/// A parsed `viewBox` attribute
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Parse four numbers; anything else is rejected
    pub fn parse(value: &str) -> Option<Self> {
        match parse_number_list(value).ok()?.as_slice() {
            &[min_x, min_y, width, height] => Some(Self::new(min_x, min_y, width, height)),
            _ => None,
        }
    }

    /// Negative or zero extents disable rendering of the viewport content
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Alignment along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisAlign {
    Min,
    Mid,
    Max,
}

impl AxisAlign {
    fn offset(self, free: f64) -> f64 {
        match self {
            AxisAlign::Min => 0.0,
            AxisAlign::Mid => free / 2.0,
            AxisAlign::Max => free,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetOrSlice {
    Meet,
    Slice,
}

/// A parsed `preserveAspectRatio` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreserveAspectRatio {
    /// `None` stretches non-uniformly
    pub align: Option<(AxisAlign, AxisAlign)>,
    pub meet_or_slice: MeetOrSlice,
}

impl Default for PreserveAspectRatio {
    fn default() -> Self {
        Self {
            align: Some((AxisAlign::Mid, AxisAlign::Mid)),
            meet_or_slice: MeetOrSlice::Meet,
        }
    }
}

impl PreserveAspectRatio {
    /// How the root is fitted into the device viewport
    pub const ROOT_FIT: Self = Self {
        align: Some((AxisAlign::Min, AxisAlign::Min)),
        meet_or_slice: MeetOrSlice::Meet,
    };

    /// Parse the attribute; invalid input yields the default
    pub fn parse(value: &str) -> Self {
        let mut words = value.split_whitespace();
        let Some(mut first) = words.next() else {
            return Self::default();
        };
        if first == "defer" {
            match words.next() {
                Some(next) => first = next,
                None => return Self::default(),
            }
        }

        let align = match first {
            "none" => None,
            other => match parse_align(other) {
                Some(align) => Some(align),
                None => return Self::default(),
            },
        };
        let meet_or_slice = match words.next() {
            None | Some("meet") => MeetOrSlice::Meet,
            Some("slice") => MeetOrSlice::Slice,
            Some(_) => return Self::default(),
        };
        Self {
            align,
            meet_or_slice,
        }
    }

    /// Map `view_box` into the viewport rectangle `(x, y, width, height)`
    pub fn fit<Src: Space, Dst: Space>(
        &self,
        view_box: &ViewBox,
        viewport: (f64, f64, f64, f64),
    ) -> Affine<Src, Dst> {
        let (x, y, width, height) = viewport;
        let sx = width / view_box.width;
        let sy = height / view_box.height;

        let (sx, sy, tx, ty) = match self.align {
            None => (sx, sy, 0.0, 0.0),
            Some((align_x, align_y)) => {
                let s = match self.meet_or_slice {
                    MeetOrSlice::Meet => sx.min(sy),
                    MeetOrSlice::Slice => sx.max(sy),
                };
                let tx = align_x.offset(width - view_box.width * s);
                let ty = align_y.offset(height - view_box.height * s);
                (s, s, tx, ty)
            }
        };

        Affine::new(
            sx,
            0.0,
            0.0,
            sy,
            x + tx - view_box.min_x * sx,
            y + ty - view_box.min_y * sy,
        )
    }
}

fn parse_align(value: &str) -> Option<(AxisAlign, AxisAlign)> {
    let axis = |s: &str| match s {
        "Min" => Some(AxisAlign::Min),
        "Mid" => Some(AxisAlign::Mid),
        "Max" => Some(AxisAlign::Max),
        _ => None,
    };
    let rest = value.strip_prefix('x')?;
    let (x, y) = rest.split_once('Y')?;
    Some((axis(x)?, axis(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Root, Screen};

    fn fit(par: &str, vb: ViewBox, viewport: (f64, f64, f64, f64)) -> Affine<Root, Screen> {
        PreserveAspectRatio::parse(par).fit(&vb, viewport)
    }

    #[test]
    fn test_parse_viewbox() {
        assert_eq!(
            ViewBox::parse("0 0 100 50"),
            Some(ViewBox::new(0.0, 0.0, 100.0, 50.0))
        );
        assert_eq!(
            ViewBox::parse("-10,-10,20,20"),
            Some(ViewBox::new(-10.0, -10.0, 20.0, 20.0))
        );
        assert_eq!(ViewBox::parse("0 0 100"), None);
        assert!(!ViewBox::new(0.0, 0.0, 0.0, 10.0).is_usable());
    }

    #[test]
    fn test_parse_preserve_aspect_ratio() {
        assert_eq!(PreserveAspectRatio::parse(""), PreserveAspectRatio::default());
        assert_eq!(
            PreserveAspectRatio::parse("xMinYMin meet"),
            PreserveAspectRatio::ROOT_FIT
        );
        let none = PreserveAspectRatio::parse("none");
        assert_eq!(none.align, None);
        let slice = PreserveAspectRatio::parse("xMaxYMid slice");
        assert_eq!(slice.align, Some((AxisAlign::Max, AxisAlign::Mid)));
        assert_eq!(slice.meet_or_slice, MeetOrSlice::Slice);
        assert_eq!(
            PreserveAspectRatio::parse("xFooYMin"),
            PreserveAspectRatio::default()
        );
    }

    #[test]
    fn test_fit_meet_min() {
        let m = fit("xMinYMin meet", ViewBox::new(0.0, 0.0, 100.0, 50.0), (0.0, 0.0, 400.0, 400.0));
        assert_eq!(m.apply(Point::new(100.0, 50.0)), Point::new(400.0, 200.0));
    }

    #[test]
    fn test_fit_meet_mid_centers() {
        let m = fit("xMidYMid meet", ViewBox::new(0.0, 0.0, 100.0, 50.0), (0.0, 0.0, 400.0, 400.0));
        assert_eq!(m.apply(Point::new(0.0, 0.0)), Point::new(0.0, 100.0));
    }

    #[test]
    fn test_fit_slice_and_none() {
        let vb = ViewBox::new(10.0, 10.0, 100.0, 50.0);
        let slice = fit("xMinYMin slice", vb, (0.0, 0.0, 400.0, 400.0));
        assert_eq!(slice.apply(Point::new(10.0, 10.0)), Point::new(0.0, 0.0));
        assert_eq!(slice.a, 8.0);

        let stretch = fit("none", vb, (5.0, 5.0, 200.0, 200.0));
        assert_eq!(stretch.apply(Point::new(110.0, 60.0)), Point::new(205.0, 205.0));
    }
}
