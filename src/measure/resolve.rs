//! Element-local to root coordinate transform resolution
//!
//! The local-to-root matrix is derived from two independently resolved
//! device mappings: element-local to screen, and root to screen. Composing
//! the first with the inverse of the second cancels whatever scaling the
//! viewport applies to the root, so nothing assumes one root unit equals
//! one device pixel.

use crate::geometry::{Affine, Local, Root};

use super::scene::Scene;

/// Outcome of resolving an element's local-to-root transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    Resolved(Affine<Local, Root>),
    /// The root-to-screen mapping is singular (zero-size viewport or
    /// viewBox); local coordinates are used as if they were root coordinates
    Degenerate,
    /// The element is not rendered, so no layout exists for it
    Unavailable,
}

impl Resolution {
    /// Transform to apply; identity unless resolved
    pub fn transform(&self) -> Affine<Local, Root> {
        match self {
            Resolution::Resolved(m) => *m,
            Resolution::Degenerate | Resolution::Unavailable => Affine::identity(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Resolve the transform mapping `element`'s local space into root space
pub fn resolve<S: Scene>(scene: &S, element: S::Element) -> Resolution {
    let Some(element_to_screen) = scene.element_to_screen(element) else {
        tracing::warn!(?element, "no screen transform for element, using local coordinates");
        return Resolution::Unavailable;
    };
    let Some(root_to_screen) = scene.root_to_screen() else {
        tracing::warn!(?element, "no root screen transform, using local coordinates");
        return Resolution::Unavailable;
    };

    match root_to_screen.inverse() {
        Some(screen_to_root) => {
            let m = element_to_screen.then(screen_to_root);
            tracing::debug!(?element, a = m.a, b = m.b, c = m.c, d = m.d, e = m.e, f = m.f, "resolved local-to-root transform");
            Resolution::Resolved(m)
        }
        None => {
            tracing::warn!(
                ?element,
                det = root_to_screen.determinant(),
                "root-to-screen transform is singular, falling back to identity"
            );
            Resolution::Degenerate
        }
    }
}
