//! SVG Measure - on-canvas measurements for SVG documents
//!
//! Load an SVG, select elements, and get their size, their offsets from
//! the canvas edges, and the gaps between two of them. All geometry is
//! expressed in the root's coordinate space regardless of nested
//! transforms, with stroke thickness excluded from the measured size.
//!
//! # Example
//!
//! ```rust
//! use svg_measure::{measure, MeasureConfig};
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
//!   <rect id="a" x="0" y="0" width="10" height="10"/>
//!   <rect id="b" x="20" y="0" width="10" height="10"/>
//! </svg>"#;
//! let update = measure(svg, &["a", "b"], &MeasureConfig::default()).unwrap();
//! let pair = update.report.pair.unwrap();
//! assert_eq!(pair.annotations[0].label, "10px");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod inspector;
pub mod measure;
pub mod overlay;
pub mod parser;
pub mod selection;
pub mod session;

pub use config::{ConfigError, MeasureConfig};
pub use document::{Diagnostic, DocumentError, ElementId, SvgDocument, Viewport};
pub use error::ParseError;
pub use export::{export_element, to_data_uri, Export};
pub use geometry::{
    Affine, Local, LocalPoint, LocalRect, Point, Rect, Root, RootPoint, RootRect, Screen,
    ScreenPoint, Segment,
};
pub use inspector::{normalize_color, Inspector};
pub use measure::{
    exclude_stroke, format_px, include_stroke, project, relate, resolve, resolve_stroke, Relation,
    Report, Scene, StrokeInfo, StyleSnapshots,
};
pub use overlay::{render_overlay, OverlayConfig};
pub use selection::{hit_test, Selection};
pub use session::{Session, Update};

use thiserror::Error;

/// Errors that can occur in the measure pipeline
#[derive(Debug, Error)]
pub enum MeasureError {
    /// The document could not be loaded
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// No element carries the requested `id`
    #[error("no element with id '{0}'")]
    UnknownElement(String),

    /// The element exists but has no geometry of its own
    #[error("element '{0}' cannot be selected")]
    NotSelectable(String),
}

/// Measure the elements with the given `id`s, in selection order
///
/// This is the main entry point for the library. It loads the source,
/// selects the elements as a multi-selection, and computes the report and
/// inspector state.
pub fn measure(source: &str, ids: &[&str], config: &MeasureConfig) -> Result<Update, MeasureError> {
    let mut session = Session::new(config.clone());
    session.load(source)?;
    for id in ids {
        select_by_id(&mut session, id)?;
    }
    Ok(session.update())
}

/// Add the element with `id` to the session's selection
pub fn select_by_id(session: &mut Session, id: &str) -> Result<ElementId, MeasureError> {
    let element = session
        .document()
        .and_then(|doc| doc.element_by_id(id))
        .ok_or_else(|| MeasureError::UnknownElement(id.to_string()))?;
    let selectable = session
        .document()
        .is_some_and(|doc| Selection::is_selectable(doc, element));
    if !selectable {
        return Err(MeasureError::NotSelectable(id.to_string()));
    }
    session
        .select_id(id)
        .ok_or_else(|| MeasureError::NotSelectable(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <rect id="a" x="0" y="0" width="100" height="50" stroke="red" stroke-width="10"/>
        <defs><rect id="hidden" width="1" height="1"/></defs>
        <title id="t">x</title>
      </svg>"#;

    #[test]
    fn test_measure_single() {
        let update = measure(SRC, &["a"], &MeasureConfig::default()).unwrap();
        let primary = update.report.primary.unwrap();
        assert_eq!(primary.size.text, "90px × 40px");
        assert_eq!(update.inspector.stroke_width, "10px");
    }

    #[test]
    fn test_measure_errors() {
        let config = MeasureConfig::default();
        assert!(matches!(
            measure(SRC, &["missing"], &config),
            Err(MeasureError::UnknownElement(id)) if id == "missing"
        ));
        assert!(matches!(
            measure(SRC, &["t"], &config),
            Err(MeasureError::NotSelectable(_))
        ));
        assert!(matches!(
            measure("not xml <", &[], &config),
            Err(MeasureError::Document(_))
        ));
    }

    #[test]
    fn test_unrendered_element_measures_locally() {
        let update = measure(SRC, &["hidden"], &MeasureConfig::default()).unwrap();
        let primary = update.report.primary.unwrap();
        assert_eq!(primary.rect, RootRect::new(0.0, 0.0, 1.0, 1.0));
    }
}
