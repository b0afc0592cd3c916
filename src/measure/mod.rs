//! Geometric measurement engine
//!
//! Pipeline, per selected element:
//! 1. `resolve`: local-to-root transform from two device mappings
//! 2. `project`: four-corner hull of the local box in root space
//! 3. `resolve_stroke`: stroke thickness in root units from the snapshot
//! 4. `exclude_stroke` / `include_stroke`: design or painted rectangle
//!
//! and for the first two selected elements, `relate`.
//!
//! None of these fail. Missing layout, singular transforms and missing
//! snapshots all degrade to identity transforms, zero-size boxes or no
//! stroke.

pub mod adjust;
pub mod project;
pub mod relation;
pub mod report;
pub mod resolve;
pub mod scene;
pub mod stroke;

pub use adjust::{exclude_stroke, include_stroke};
pub use project::{project, project_box};
pub use relation::{relate, ContainmentGaps, Gap, Relation};
pub use report::{
    format_px, measure_element, measure_selection, measured_rect, Annotation, ElementReport,
    PairReport, Report, SizeLabel, NOT_AVAILABLE,
};
pub use resolve::{resolve, Resolution};
pub use scene::{ComputedStyle, Scene};
pub use stroke::{is_no_paint, resolve_stroke, StrokeInfo, StyleSnapshot, StyleSnapshots};
