//! Projection of local bounding boxes into root space

use crate::geometry::{Affine, Local, LocalRect, Root, RootRect};

use super::resolve::resolve;
use super::scene::Scene;

/// Axis-aligned root-space bounding box of an element, stroke excluded.
///
/// An element without local geometry projects to a zero-size box at the
/// origin; a zero-width or zero-height local box stays degenerate.
pub fn project<S: Scene>(scene: &S, element: S::Element) -> RootRect {
    let Some(local) = scene.local_bbox(element) else {
        tracing::debug!(?element, "element has no local geometry");
        return RootRect::zero();
    };
    let resolution = resolve(scene, element);
    let projected = project_box(&local, &resolution.transform());
    tracing::debug!(?element, local = %local, root = %projected, "projected bounding box");
    projected
}

/// Map all four corners of `local` and take their axis-aligned hull
pub fn project_box(local: &LocalRect, transform: &Affine<Local, Root>) -> RootRect {
    transform.transform_rect(local)
}
