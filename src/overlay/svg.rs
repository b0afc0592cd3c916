//! SVG generation for the measurement overlay

use crate::document::serialize::escape;
use crate::document::Viewport;
use crate::geometry::{Affine, Root, RootPoint, Screen, ScreenPoint, Segment};
use crate::measure::{Annotation, Report};

use super::OverlayConfig;

/// Stroke and label colors of the overlay marks
const OVERLAY_CSS: &str = "line { stroke: #1e88e5; stroke-width: 1; } \
circle { fill: #1e88e5; } \
text { font: 11px sans-serif; fill: #0d47a1; paint-order: stroke; stroke: #fff; stroke-width: 3; }";

/// Format a coordinate with at most two decimals
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Build overlay SVG elements incrementally, in screen pixels
pub struct OverlayBuilder {
    config: OverlayConfig,
    elements: Vec<String>,
    indent: usize,
}

impl OverlayBuilder {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// A measured segment: line, end dots and a label at its midpoint
    pub fn add_measure_line(&mut self, from: ScreenPoint, to: ScreenPoint, label: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<line class="{}line" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            prefix,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        ));
        for p in [from, to] {
            self.elements.push(format!(
                r#"{}<circle class="{}dot" cx="{}" cy="{}" r="{}"/>"#,
                self.indent_str(),
                prefix,
                num(p.x),
                num(p.y),
                num(self.config.dot_radius)
            ));
        }
        let mid = Segment::new(from, to).midpoint();
        self.add_label(mid, label, &[]);
    }

    /// A centered label
    pub fn add_label(&mut self, at: ScreenPoint, text: &str, classes: &[String]) {
        let prefix = self.prefix();
        let class_list = std::iter::once(format!("{}label", prefix))
            .chain(classes.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="middle">{}</text>"#,
            self.indent_str(),
            class_list,
            num(at.x),
            num(at.y),
            escape(text)
        ));
    }

    /// Build the final SVG string covering the viewport
    pub fn build(self, viewport: &Viewport) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(viewport.width),
            h = num(viewport.height)
        ));
        svg.push_str(nl);

        if self.config.pretty_print {
            svg.push_str("  ");
        }
        svg.push_str("<style>");
        svg.push_str(OVERLAY_CSS);
        svg.push_str("</style>");
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Render a report's geometry in screen space.
///
/// `root_to_screen` is applied to every root-space point; without it
/// nothing can be placed and the overlay is empty.
pub fn render_overlay<E>(
    report: &Report<E>,
    root_to_screen: Option<&Affine<Root, Screen>>,
    viewport: &Viewport,
    config: &OverlayConfig,
) -> String {
    let mut builder = OverlayBuilder::new(config.clone());
    let Some(m) = root_to_screen else {
        return builder.build(viewport);
    };
    let to_screen = |p: RootPoint| m.apply(p);

    let draw = |builder: &mut OverlayBuilder, a: &Annotation| {
        builder.add_measure_line(
            to_screen(a.segment.from),
            to_screen(a.segment.to),
            &a.label,
        );
    };

    if let Some(primary) = &report.primary {
        let anchor = to_screen(primary.size.anchor);
        let at = ScreenPoint::new(anchor.x, anchor.y + config.size_label_offset);
        let size_class = format!("{}size", builder.prefix());
        builder.add_label(at, &primary.size.text, &[size_class]);
        draw(&mut builder, &primary.left_offset);
        draw(&mut builder, &primary.top_offset);
    }
    if let Some(pair) = &report.pair {
        for annotation in &pair.annotations {
            draw(&mut builder, annotation);
        }
    }

    builder.build(viewport)
}
