//! End-to-end measurement scenarios on parsed documents.
//!
//! These tests drive the engine through `SvgDocument` as the scene, with a
//! viewport that scales the canvas, so every projected box has gone through
//! the local -> screen -> root round trip.

use pretty_assertions::assert_eq;
use svg_measure::{
    exclude_stroke, include_stroke, project, relate, resolve, resolve_stroke,
    measure::Resolution, Relation, RootRect, Selection, StrokeInfo, StyleSnapshots, SvgDocument,
    Viewport,
};

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn assert_rect(actual: RootRect, left: f64, top: f64, width: f64, height: f64) {
    assert!(approx_eq(actual.left, left), "left: expected {}, got {}", left, actual.left);
    assert!(approx_eq(actual.top, top), "top: expected {}, got {}", top, actual.top);
    assert!(
        approx_eq(actual.width(), width),
        "width: expected {}, got {}",
        width,
        actual.width()
    );
    assert!(
        approx_eq(actual.height(), height),
        "height: expected {}, got {}",
        height,
        actual.height()
    );
}

fn load(body: &str) -> SvgDocument {
    let src = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">{}</svg>"#,
        body
    );
    let mut doc = SvgDocument::parse(&src).expect("valid svg");
    // 200x100 canvas shown at 3x
    doc.set_viewport(Viewport::new(600.0, 600.0));
    doc
}

fn id(doc: &SvgDocument, name: &str) -> svg_measure::ElementId {
    doc.element_by_id(name).expect("element exists")
}

/// Select `name` so its style snapshot exists, then return the measured box
fn measured(doc: &mut SvgDocument, selection: &mut Selection, name: &str) -> RootRect {
    let element = id(doc, name);
    selection.click(doc, element, true);
    let raw = project(&*doc, element);
    let stroke = resolve_stroke(&*doc, element, selection.snapshots());
    exclude_stroke(&raw, &stroke)
}

#[test]
fn test_identity_rect_projects_unchanged() {
    let doc = load(r#"<rect id="a" x="0" y="0" width="100" height="50"/>"#);
    let a = id(&doc, "a");
    assert!(resolve(&doc, a).is_resolved());
    assert_rect(project(&doc, a), 0.0, 0.0, 100.0, 50.0);
}

#[test]
fn test_stroke_excluded_from_size() {
    let mut doc = load(
        r#"<rect id="b" x="0" y="0" width="100" height="50" stroke="black" stroke-width="10"/>"#,
    );
    let mut selection = Selection::new("#F4A12D");
    let rect = measured(&mut doc, &mut selection, "b");
    assert_rect(rect, 5.0, 5.0, 90.0, 40.0);
}

#[test]
fn test_highlight_does_not_change_measurement() {
    let mut doc = load(r#"<rect id="r" x="10" y="10" width="40" height="40"/>"#);
    let mut selection = Selection::new("#F4A12D");
    let first = measured(&mut doc, &mut selection, "r");
    // The element now carries the highlight stroke; its snapshot says none
    assert_eq!(doc.attribute(id(&doc, "r"), "stroke"), Some("#F4A12D"));
    let second = measured(&mut doc, &mut selection, "r");
    assert_rect(first, 10.0, 10.0, 40.0, 40.0);
    assert_eq!(first, second);
}

#[test]
fn test_css_stroke_width_is_in_user_units() {
    let mut doc = load(
        r#"<rect id="r" x="10" y="10" width="40" height="40" style="stroke: red; stroke-width: 6px"/>"#,
    );
    let mut selection = Selection::new("#F4A12D");
    let element = id(&doc, "r");
    selection.click(&mut doc, element, false);
    let stroke = resolve_stroke(&doc, element, selection.snapshots());
    // 6 user units are 18 device px at 3x, which is 6 root units again
    assert!(approx_eq(stroke.width(), 6.0), "stroke: expected 6, got {}", stroke.width());
}

#[test]
fn test_inherited_stroke_survives_resize() {
    let body = r#"<g stroke-width="4"><rect id="r" width="100" height="50" stroke="black"/></g>"#;
    for (width, height) in [(200.0, 100.0), (800.0, 400.0), (333.0, 77.0)] {
        let mut doc = load(body);
        doc.set_viewport(Viewport::new(width, height));
        let mut selection = Selection::new("#F4A12D");
        let rect = measured(&mut doc, &mut selection, "r");
        assert_rect(rect, 2.0, 2.0, 96.0, 46.0);
    }
}

#[test]
fn test_default_stroke_width_scales_with_group() {
    let mut doc = load(
        r#"<g transform="scale(2)"><rect id="r" width="50" height="25" stroke="black"/></g>"#,
    );
    let mut selection = Selection::new("#F4A12D");
    let element = id(&doc, "r");
    selection.click(&mut doc, element, false);
    // The initial width of 1 is drawn in the scaled group
    let stroke = resolve_stroke(&doc, element, selection.snapshots());
    assert!(approx_eq(stroke.width(), 2.0), "stroke: expected 2, got {}", stroke.width());
}

#[test]
fn test_resize_after_selection_keeps_stroke() {
    let mut doc = load(r#"<g stroke-width="4"><rect id="r" width="100" height="50" stroke="black"/></g>"#);
    let mut selection = Selection::new("#F4A12D");
    let before = measured(&mut doc, &mut selection, "r");
    doc.set_viewport(Viewport::new(800.0, 400.0));
    let element = id(&doc, "r");
    let after = exclude_stroke(
        &project(&doc, element),
        &resolve_stroke(&doc, element, selection.snapshots()),
    );
    assert_rect(before, 2.0, 2.0, 96.0, 46.0);
    assert_rect(after, 2.0, 2.0, 96.0, 46.0);
}

#[test]
fn test_separated_rects_horizontal_gap() {
    let doc = load(
        r#"<rect id="a" x="0" y="0" width="10" height="10"/>
           <rect id="b" x="20" y="0" width="10" height="10"/>"#,
    );
    let relation = relate(&project(&doc, id(&doc, "a")), &project(&doc, id(&doc, "b")));
    let Relation::HorizontalGap(gap) = relation else {
        panic!("expected horizontal gap, got {:?}", relation);
    };
    assert!(approx_eq(gap.length, 10.0));
    assert!(approx_eq(gap.segment.from.x, 10.0));
    assert!(approx_eq(gap.segment.to.x, 20.0));
}

#[test]
fn test_containment_gaps_and_symmetry() {
    let doc = load(
        r#"<rect id="outer" x="0" y="0" width="100" height="100"/>
           <rect id="inner" x="40" y="40" width="20" height="20"/>"#,
    );
    let outer = project(&doc, id(&doc, "outer"));
    let inner = project(&doc, id(&doc, "inner"));

    let forward = relate(&outer, &inner);
    let backward = relate(&inner, &outer);
    assert_eq!(forward, backward);

    let Relation::Containment { gaps, .. } = forward else {
        panic!("expected containment, got {:?}", forward);
    };
    for gap in gaps.iter() {
        assert!(approx_eq(gap.length, 40.0), "gap: expected 40, got {}", gap.length);
    }
}

#[test]
fn test_nested_transform_uses_four_corner_hull() {
    let doc = load(
        r#"<g transform="translate(10,20) rotate(45)">
             <rect id="e" x="0" y="0" width="10" height="10"/>
           </g>"#,
    );
    let half_diagonal = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
    let rect = project(&doc, id(&doc, "e"));
    assert_rect(
        rect,
        10.0 - half_diagonal,
        20.0,
        2.0 * half_diagonal,
        2.0 * half_diagonal,
    );
    // A two-corner projection would report the untouched 10x10 box
    assert!(rect.width() > 10.0 + 1.0);
}

#[test]
fn test_quarter_turn_swaps_extent() {
    let doc = load(
        r#"<rect id="flat" x="0" y="0" width="40" height="10"/>
           <rect id="turned" x="0" y="0" width="40" height="10" transform="rotate(90 20 5)"/>"#,
    );
    let flat = project(&doc, id(&doc, "flat"));
    let turned = project(&doc, id(&doc, "turned"));
    assert!(approx_eq(turned.width(), flat.height()));
    assert!(approx_eq(turned.height(), flat.width()));
    assert!(approx_eq(turned.center().x, flat.center().x));
    assert!(approx_eq(turned.center().y, flat.center().y));
}

#[test]
fn test_zero_height_line_is_not_an_error() {
    let doc = load(r#"<line id="l" x1="10" y1="30" x2="90" y2="30" stroke="black"/>"#);
    assert_rect(project(&doc, id(&doc, "l")), 10.0, 30.0, 80.0, 0.0);
}

#[test]
fn test_thick_stroke_clamps_to_zero() {
    let raw = RootRect::new(0.0, 0.0, 4.0, 4.0);
    for width in [0.0, 1.0, 4.0, 10.0, 1e9] {
        let stroke = StrokeInfo::new(true, width);
        let adjusted = exclude_stroke(&raw, &stroke);
        assert!(adjusted.width() >= 0.0 && adjusted.height() >= 0.0);
        assert!(raw.encloses(&adjusted), "{} escapes {}", adjusted, raw);
    }
}

#[test]
fn test_include_stroke_grows_by_width() {
    let raw = RootRect::new(3.0, 7.0, 20.0, 12.0);
    let grown = include_stroke(&raw, &StrokeInfo::new(true, 6.0));
    assert_eq!(grown.width(), raw.width() + 6.0);
    assert_eq!(grown.height(), raw.height() + 6.0);
}

#[test]
fn test_hidden_element_degrades_to_local_box() {
    let doc = load(
        r#"<g transform="translate(50 50)" display="none">
             <rect id="h" x="1" y="2" width="3" height="4"/>
           </g>"#,
    );
    let h = id(&doc, "h");
    assert_eq!(resolve(&doc, h), Resolution::Unavailable);
    assert_rect(project(&doc, h), 1.0, 2.0, 3.0, 4.0);
}

#[test]
fn test_zero_viewport_is_degenerate() {
    let mut doc = load(r#"<rect id="r" x="5" y="5" width="10" height="10" transform="scale(2)"/>"#);
    doc.set_viewport(Viewport::new(0.0, 0.0));
    let r = id(&doc, "r");
    assert_eq!(resolve(&doc, r), Resolution::Degenerate);
    assert_rect(project(&doc, r), 5.0, 5.0, 10.0, 10.0);
}

#[test]
fn test_missing_snapshot_means_no_stroke() {
    let doc = load(r#"<rect id="r" width="10" height="10" stroke="red" stroke-width="3"/>"#);
    let stroke = resolve_stroke(&doc, id(&doc, "r"), &StyleSnapshots::new());
    assert_eq!(stroke, StrokeInfo::none());
}
