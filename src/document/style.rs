//! Property cascade for the paint and text properties the engine reads
//!
//! Precedence, highest first: the inline `style` declaration, the
//! presentation attribute, the parent's value (for inherited properties),
//! the initial value. A declaration whose value does not parse is ignored
//! and the next source is consulted.

use crate::measure::ComputedStyle;
use crate::parser::{parse_length, Length, DEFAULT_FONT_SIZE};

use super::{ElementId, SvgDocument};

/// Split a `style` attribute into `(property, value)` pairs
pub fn declarations(style: &str) -> impl Iterator<Item = (&str, &str)> {
    style.split(';').filter_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        let name = name.trim();
        let value = value.trim();
        let value = value
            .strip_suffix("!important")
            .map(str::trim_end)
            .unwrap_or(value);
        if name.is_empty() || value.is_empty() {
            None
        } else {
            Some((name, value))
        }
    })
}

/// Value of `property` declared directly on an element, inline style first.
///
/// The last inline declaration of a property wins, as in CSS.
pub fn declared<'d>(doc: &'d SvgDocument, id: ElementId, property: &str) -> Option<&'d str> {
    let inline = doc
        .attribute(id, "style")
        .and_then(|style| declarations(style).filter(|(name, _)| *name == property).last())
        .map(|(_, value)| value);
    inline.or_else(|| doc.attribute(id, property).map(str::trim))
}

/// Cascade an inherited property, accepting only values `parse` understands
fn cascade<T>(
    doc: &SvgDocument,
    id: ElementId,
    property: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let mut cursor = Some(id);
    while let Some(current) = cursor {
        let inline = doc
            .attribute(current, "style")
            .and_then(|style| {
                declarations(style)
                    .filter(|(name, value)| *name == property && *value != "inherit")
                    .filter_map(|(_, value)| parse(value))
                    .last()
            });
        if let Some(value) = inline {
            return Some(value);
        }
        let attr = doc
            .attribute(current, property)
            .map(str::trim)
            .filter(|v| *v != "inherit")
            .and_then(&parse);
        if let Some(value) = attr {
            return Some(value);
        }
        cursor = doc.parent(current);
    }
    None
}

fn paint(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}

/// Stroke width as authored, percentages relative to the canvas diagonal
fn stroke_width(doc: &SvgDocument, value: &str) -> Option<f64> {
    let length = parse_length(value)?;
    let canvas = doc.canvas_box();
    let reference = (canvas.width.powi(2) + canvas.height.powi(2)).sqrt() / std::f64::consts::SQRT_2;
    let px = length.to_user_units(reference);
    (px.is_finite() && px >= 0.0).then_some(px)
}

/// Paint properties after the cascade
pub fn computed_style(doc: &SvgDocument, id: ElementId) -> ComputedStyle {
    let initial = ComputedStyle::default();
    ComputedStyle {
        fill: cascade(doc, id, "fill", paint).unwrap_or(initial.fill),
        stroke: cascade(doc, id, "stroke", paint).unwrap_or(initial.stroke),
        stroke_width: cascade(doc, id, "stroke-width", |v| stroke_width(doc, v))
            .unwrap_or(initial.stroke_width),
    }
}

/// Font size in user units; relative sizes resolve against the default
pub fn font_size(doc: &SvgDocument, id: ElementId) -> f64 {
    let parse = |v: &str| {
        parse_length(v)
            .map(|l: Length| l.to_user_units(DEFAULT_FONT_SIZE))
            .filter(|px| px.is_finite() && *px > 0.0)
    };
    cascade(doc, id, "font-size", parse).unwrap_or(DEFAULT_FONT_SIZE)
}

/// Horizontal text alignment relative to the `x` position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

pub fn text_anchor(doc: &SvgDocument, id: ElementId) -> TextAnchor {
    let parse = |v: &str| match v {
        "start" => Some(TextAnchor::Start),
        "middle" => Some(TextAnchor::Middle),
        "end" => Some(TextAnchor::End),
        _ => None,
    };
    cascade(doc, id, "text-anchor", parse).unwrap_or(TextAnchor::Start)
}

/// `display: none` on the element itself (the property is not inherited,
/// callers walk ancestors)
pub fn is_display_none(doc: &SvgDocument, id: ElementId) -> bool {
    declared(doc, id, "display") == Some("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(src: &str) -> SvgDocument {
        SvgDocument::parse(src).expect("valid svg")
    }

    #[test]
    fn test_declarations() {
        let decls: Vec<_> = declarations("fill: red; stroke:blue !important;;bad").collect();
        assert_eq!(decls, vec![("fill", "red"), ("stroke", "blue")]);
    }

    #[test]
    fn test_initial_values() {
        let d = doc(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect id="r"/></svg>"#);
        let style = computed_style(&d, d.element_by_id("r").unwrap());
        assert_eq!(style, ComputedStyle::default());
    }

    #[test]
    fn test_inline_beats_attribute_beats_inherited() {
        let d = doc(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                <g stroke="green" stroke-width="3" fill="yellow">
                  <rect id="a" fill="red" style="fill: blue"/>
                  <rect id="b" stroke="inherit"/>
                </g>
              </svg>"#,
        );
        let a = computed_style(&d, d.element_by_id("a").unwrap());
        assert_eq!(a.fill, "blue");
        assert_eq!(a.stroke, "green");
        assert_eq!(a.stroke_width, 3.0);

        let b = computed_style(&d, d.element_by_id("b").unwrap());
        assert_eq!(b.fill, "yellow");
        assert_eq!(b.stroke, "green");
    }

    #[test]
    fn test_invalid_stroke_width_falls_through() {
        let d = doc(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                <g stroke-width="4"><rect id="r" stroke-width="wide" style="stroke-width: 2pt"/></g>
              </svg>"#,
        );
        let style = computed_style(&d, d.element_by_id("r").unwrap());
        assert!((style.stroke_width - 8.0 / 3.0).abs() < 1e-9);

        let d = doc(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
                <g stroke-width="4"><rect id="r" stroke-width="wide"/></g>
              </svg>"#,
        );
        assert_eq!(computed_style(&d, d.element_by_id("r").unwrap()).stroke_width, 4.0);
    }

    #[test]
    fn test_font_size_and_anchor() {
        let d = doc(
            r#"<svg xmlns="http://www.w3.org/2000/svg" font-size="20">
                <text id="t" text-anchor="middle">hi</text>
              </svg>"#,
        );
        let t = d.element_by_id("t").unwrap();
        assert_eq!(font_size(&d, t), 20.0);
        assert_eq!(text_anchor(&d, t), TextAnchor::Middle);
    }
}
