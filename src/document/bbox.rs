//! Local geometric bounding boxes
//!
//! Boxes exclude stroke and are expressed in the element's own local space,
//! before its `transform`. Containers report the union of their rendered
//! children's hulls.

use crate::geometry::{Affine, Local, LocalPoint, LocalRect};
use crate::parser::{parse_length, parse_number_list, parse_path, path_bounds};

use super::style::{self, TextAnchor};
use super::{ElementId, PreserveAspectRatio, SvgDocument, ViewBox};

/// `use` chains deeper than this are treated as cycles
const MAX_USE_DEPTH: usize = 16;

/// Average glyph advance as a fraction of the font size
const GLYPH_ADVANCE: f64 = 0.5;
/// Ascent and descent as fractions of the font size
const ASCENT: f64 = 0.8;
const DESCENT: f64 = 0.2;

pub fn local_bbox(doc: &SvgDocument, id: ElementId) -> Option<LocalRect> {
    bbox_at_depth(doc, id, 0)
}

fn bbox_at_depth(doc: &SvgDocument, id: ElementId, depth: usize) -> Option<LocalRect> {
    let element = doc.element(id);
    if !element.is_svg() {
        return None;
    }
    let canvas = doc.canvas_box();
    let diagonal = (canvas.width.powi(2) + canvas.height.powi(2)).sqrt() / std::f64::consts::SQRT_2;
    let x_len = |name: &str| doc.length(id, name, canvas.width).unwrap_or(0.0);
    let y_len = |name: &str| doc.length(id, name, canvas.height).unwrap_or(0.0);

    match element.tag() {
        "rect" | "image" | "foreignObject" => Some(LocalRect::new(
            x_len("x"),
            y_len("y"),
            x_len("width"),
            y_len("height"),
        )),
        "circle" => {
            let r = doc.length(id, "r", diagonal).unwrap_or(0.0).max(0.0);
            Some(LocalRect::new(x_len("cx") - r, y_len("cy") - r, 2.0 * r, 2.0 * r))
        }
        "ellipse" => {
            let rx = doc.length(id, "rx", canvas.width);
            let ry = doc.length(id, "ry", canvas.height);
            // A missing radius takes the other one
            let (rx, ry) = match (rx, ry) {
                (Some(rx), Some(ry)) => (rx, ry),
                (Some(r), None) | (None, Some(r)) => (r, r),
                (None, None) => (0.0, 0.0),
            };
            let (rx, ry) = (rx.max(0.0), ry.max(0.0));
            Some(LocalRect::new(x_len("cx") - rx, y_len("cy") - ry, 2.0 * rx, 2.0 * ry))
        }
        "line" => LocalRect::from_points([
            LocalPoint::new(x_len("x1"), y_len("y1")),
            LocalPoint::new(x_len("x2"), y_len("y2")),
        ]),
        "polyline" | "polygon" => points_bbox(doc, id),
        "path" => {
            let parsed = parse_path(doc.attribute(id, "d").unwrap_or(""));
            if let Some(error) = &parsed.error {
                tracing::debug!(element = %id, %error, "path data rendered up to error");
            }
            path_bounds(&parsed.segments)
        }
        "text" => text_bbox(doc, id),
        "use" => use_bbox(doc, id, depth),
        "g" | "svg" | "a" | "switch" => {
            children_union(doc, id, doc.content_to_local(id), depth)
        }
        _ => None,
    }
}

fn points_bbox(doc: &SvgDocument, id: ElementId) -> Option<LocalRect> {
    let raw = doc.attribute(id, "points")?;
    let numbers = match parse_number_list(raw) {
        Ok(numbers) => numbers,
        Err(error) => {
            tracing::warn!(element = %id, %error, "unparsable points attribute");
            return None;
        }
    };
    // An odd trailing coordinate is ignored
    LocalRect::from_points(
        numbers
            .chunks_exact(2)
            .map(|pair| LocalPoint::new(pair[0], pair[1])),
    )
}

/// Union of the rendered children's boxes, mapped into the parent's local
/// space through `content`
fn children_union(
    doc: &SvgDocument,
    id: ElementId,
    content: Affine<Local, Local>,
    depth: usize,
) -> Option<LocalRect> {
    doc.child_elements(id)
        .filter(|&child| !doc.is_hidden(child))
        .filter_map(|child| {
            let bbox = bbox_at_depth(doc, child, depth)?;
            let to_parent = doc.local_transform(child).then(content);
            Some(to_parent.transform_rect(&bbox))
        })
        .reduce(|acc, r| acc.union(&r))
}

fn use_bbox(doc: &SvgDocument, id: ElementId, depth: usize) -> Option<LocalRect> {
    if depth >= MAX_USE_DEPTH {
        tracing::warn!(element = %id, "use reference chain too deep, ignoring");
        return None;
    }
    let target = doc.href_target(id)?;
    let canvas = doc.canvas_box();
    let x = doc.length(id, "x", canvas.width).unwrap_or(0.0);
    let y = doc.length(id, "y", canvas.height).unwrap_or(0.0);
    let offset: Affine<Local, Local> = Affine::translate(x, y);

    if doc.tag(target) == "symbol" {
        let width = doc.length(id, "width", canvas.width).unwrap_or(canvas.width);
        let height = doc.length(id, "height", canvas.height).unwrap_or(canvas.height);
        let content: Affine<Local, Local> = match doc
            .attribute(target, "viewBox")
            .and_then(ViewBox::parse)
            .filter(ViewBox::is_usable)
        {
            Some(vb) => doc
                .attribute(target, "preserveAspectRatio")
                .map(PreserveAspectRatio::parse)
                .unwrap_or_default()
                .fit(&vb, (0.0, 0.0, width, height)),
            None => Affine::identity(),
        };
        return children_union(doc, target, content.then(offset), depth + 1);
    }

    let bbox = bbox_at_depth(doc, target, depth + 1)?;
    Some(doc.local_transform(target).then(offset).transform_rect(&bbox))
}

/// First coordinate of a text positioning list
fn first_coordinate(doc: &SvgDocument, id: ElementId, name: &str, reference: f64) -> f64 {
    doc.attribute(id, name)
        .and_then(|v| {
            v.split(|c: char| c == ',' || c.is_whitespace())
                .find(|s| !s.is_empty())
        })
        .and_then(parse_length)
        .map(|l| l.to_user_units(reference))
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Approximate text extent from the font size and character count.
///
/// No font metrics are available, so glyphs are assumed to advance half an
/// em and the line box to span 0.8 em above and 0.2 em below the baseline.
fn text_bbox(doc: &SvgDocument, id: ElementId) -> Option<LocalRect> {
    let canvas = doc.canvas_box();
    let x = first_coordinate(doc, id, "x", canvas.width);
    let y = first_coordinate(doc, id, "y", canvas.height);
    let content = doc.text_content(id);
    let chars = content.split_whitespace().collect::<Vec<_>>().join(" ").chars().count();
    if chars == 0 {
        return Some(LocalRect::new(x, y, 0.0, 0.0));
    }

    let font_size = style::font_size(doc, id);
    let width = chars as f64 * font_size * GLYPH_ADVANCE;
    let left = match style::text_anchor(doc, id) {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - width / 2.0,
        TextAnchor::End => x - width,
    };
    Some(LocalRect::new(
        left,
        y - ASCENT * font_size,
        width,
        (ASCENT + DESCENT) * font_size,
    ))
}
