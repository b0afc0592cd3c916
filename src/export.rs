//! Standalone SVG export of a single element, cropped to its painted extent

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

use crate::document::serialize::write_element;
use crate::document::{ElementId, SvgDocument, SVG_NS, XLINK_NS};
use crate::geometry::RootRect;
use crate::measure::{include_stroke, project, resolve_stroke, StyleSnapshots};

/// An exported element
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Crop rectangle in root units: the stroke-inclusive box plus padding
    pub crop: RootRect,
    pub svg: String,
}

impl Export {
    /// The SVG as a base64 `data:` URI
    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.svg)
    }
}

pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", BASE64_STANDARD.encode(svg.as_bytes()))
}

/// Crop coordinate at full precision
fn num(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

/// Export `element` as a standalone SVG.
///
/// The crop uses the stroke-inclusive box so the painted outline is not
/// clipped. The subtree is wrapped in a group carrying the transform from
/// its parent's coordinate system to the root, so it renders where it did
/// in the document. Selection highlights are reverted in the output using
/// `snapshots`, and `<defs>` outside the subtree are copied so referenced
/// paint servers and symbols still resolve.
pub fn export_element(
    doc: &SvgDocument,
    element: ElementId,
    snapshots: &StyleSnapshots<ElementId>,
    padding: f64,
) -> Export {
    let local_snapshots;
    let snapshots = if snapshots.contains(element) {
        snapshots
    } else {
        let mut copy = snapshots.clone();
        copy.record(doc, element);
        local_snapshots = copy;
        &local_snapshots
    };

    let raw = project(doc, element);
    let stroke = resolve_stroke(doc, element, snapshots);
    let crop = include_stroke(&raw, &stroke).inflate(padding.max(0.0));
    tracing::debug!(%element, %raw, %crop, stroke = stroke.width(), "exporting element");

    let mut clean = doc.clone();
    revert_highlights(&mut clean, element, snapshots);

    let mut body = String::new();
    for defs in clean
        .elements()
        .filter(|&e| clean.tag(e) == "defs" && !is_inclusive_ancestor(&clean, e, element))
    {
        write_element(&clean, defs, Some(SVG_NS), &mut body);
    }

    let to_root = clean.parent_content_to_root(element);
    if to_root.is_identity() {
        write_element(&clean, element, Some(SVG_NS), &mut body);
    } else {
        body.push_str(&format!(r#"<g transform="{}">"#, to_root.to_svg_matrix()));
        write_element(&clean, element, Some(SVG_NS), &mut body);
        body.push_str("</g>");
    }

    let svg = format!(
        r#"<svg xmlns="{svg_ns}" xmlns:xlink="{xlink_ns}" viewBox="{x} {y} {w} {h}" width="{w}" height="{h}">{body}</svg>"#,
        svg_ns = SVG_NS,
        xlink_ns = XLINK_NS,
        x = num(crop.left),
        y = num(crop.top),
        w = num(crop.width()),
        h = num(crop.height()),
        body = body
    );
    Export { crop, svg }
}

/// Whether `candidate` is `element` or one of its ancestors
fn is_inclusive_ancestor(doc: &SvgDocument, candidate: ElementId, element: ElementId) -> bool {
    candidate == element || doc.ancestors(element).any(|a| a == candidate)
}

/// Restore the authored `stroke` of every snapshotted element in the subtree
fn revert_highlights(doc: &mut SvgDocument, element: ElementId, snapshots: &StyleSnapshots<ElementId>) {
    let mut stack = vec![element];
    while let Some(current) = stack.pop() {
        if let Some(snapshot) = snapshots.get(current) {
            match snapshot.stroke_attr.clone() {
                Some(original) => doc.set_attribute(current, "stroke", &original),
                None => doc.remove_attribute(current, "stroke"),
            }
        }
        stack.extend(doc.child_elements(current).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;

    const SRC: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <defs><linearGradient id="lg"/></defs>
        <g transform="translate(10 20)">
          <rect id="r" x="0" y="0" width="30" height="10" stroke="black" stroke-width="4" fill="url(#lg)"/>
        </g>
        <rect id="plain" x="5" y="5" width="10" height="10"/>
      </svg>"##;

    #[test]
    fn test_crop_includes_stroke_and_padding() {
        let doc = SvgDocument::parse(SRC).unwrap();
        let r = doc.element_by_id("r").unwrap();
        let export = export_element(&doc, r, &StyleSnapshots::new(), 2.0);
        assert_eq!(export.crop, RootRect::new(6.0, 16.0, 38.0, 18.0));
        assert!(export.svg.contains(r#"viewBox="6 16 38 18""#), "{}", export.svg);
        assert!(export.svg.contains(r#"<g transform="matrix(1 0 0 1 10 20)">"#));
        assert!(export.svg.contains(r#"<linearGradient id="lg"/>"#));
    }

    #[test]
    fn test_highlight_reverted() {
        let mut doc = SvgDocument::parse(SRC).unwrap();
        let r = doc.element_by_id("r").unwrap();
        let plain = doc.element_by_id("plain").unwrap();
        let mut sel = Selection::new("#F4A12D");
        sel.click(&mut doc, r, false);
        sel.click(&mut doc, plain, true);

        let export = export_element(&doc, r, sel.snapshots(), 2.0);
        assert!(export.svg.contains(r#"stroke="black""#));
        assert!(!export.svg.contains("#F4A12D"));
        // The document itself keeps its highlight
        assert_eq!(doc.attribute(r, "stroke"), Some("#F4A12D"));

        let export = export_element(&doc, plain, sel.snapshots(), 0.0);
        assert_eq!(export.crop, RootRect::new(5.0, 5.0, 10.0, 10.0));
        assert!(!export.svg.contains("stroke="));
        assert!(!export.svg.contains("<g transform"));
    }

    #[test]
    fn test_fractional_crop_written_exactly() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
                <rect id="f" x="1.0004" y="2.0004" width="3.0002" height="4"/>
              </svg>"#,
        )
        .unwrap();
        let f = doc.element_by_id("f").unwrap();
        let export = export_element(&doc, f, &StyleSnapshots::new(), 0.0);
        assert!((export.crop.left - 1.0004).abs() < 1e-9);
        let view_box = format!(
            r#"viewBox="{} {} {} {}""#,
            export.crop.left,
            export.crop.top,
            export.crop.width(),
            export.crop.height()
        );
        assert!(export.svg.contains(&view_box), "{}", export.svg);
        assert!(!export.svg.contains(r#"viewBox="1 2"#));
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(to_data_uri("<svg/>"), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
