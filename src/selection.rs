//! Selection state, highlighting and hit testing
//!
//! The selection owns the style snapshot side table. A snapshot is taken the
//! first time an element is selected, before the highlight stroke is
//! applied, and is reused for every later measurement of that element.

use crate::document::{ElementId, SvgDocument};
use crate::geometry::{RootRect, ScreenPoint};
use crate::measure::{project, Scene, StyleSnapshots};

#[derive(Debug, Clone)]
pub struct Selection {
    selected: Vec<ElementId>,
    snapshots: StyleSnapshots<ElementId>,
    highlight_color: String,
}

impl Selection {
    pub fn new(highlight_color: impl Into<String>) -> Self {
        Self {
            selected: Vec::new(),
            snapshots: StyleSnapshots::new(),
            highlight_color: highlight_color.into(),
        }
    }

    /// Selected elements in selection order
    pub fn elements(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn first(&self) -> Option<ElementId> {
        self.selected.first().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.selected.contains(&element)
    }

    pub fn snapshots(&self) -> &StyleSnapshots<ElementId> {
        &self.snapshots
    }

    pub fn highlight_color(&self) -> &str {
        &self.highlight_color
    }

    /// Whether clicking `element` can select it: a graphics element other
    /// than the root
    pub fn is_selectable(doc: &SvgDocument, element: ElementId) -> bool {
        element != doc.root() && doc.is_graphics(element)
    }

    /// Handle a click.
    ///
    /// Without `multi` the selection is replaced by `element`; with it,
    /// `element` is toggled. Returns false when the element cannot be
    /// selected and nothing changed.
    pub fn click(&mut self, doc: &mut SvgDocument, element: ElementId, multi: bool) -> bool {
        if !Self::is_selectable(doc, element) {
            tracing::debug!(%element, tag = doc.tag(element), "click on non-selectable element");
            return false;
        }
        if !multi {
            self.clear(doc);
            self.add(doc, element);
        } else if self.contains(element) {
            self.remove(doc, element);
        } else {
            self.add(doc, element);
        }
        true
    }

    /// Deselect everything and restore original strokes
    pub fn clear(&mut self, doc: &mut SvgDocument) {
        for element in std::mem::take(&mut self.selected) {
            self.unhighlight(doc, element);
        }
    }

    fn add(&mut self, doc: &mut SvgDocument, element: ElementId) {
        if self.snapshots.record(&*doc, element) {
            tracing::debug!(%element, "captured style snapshot");
        }
        self.selected.push(element);
        // Only the stroke color changes; stroke-width stays as authored
        doc.set_attribute(element, "stroke", &self.highlight_color);
    }

    fn remove(&mut self, doc: &mut SvgDocument, element: ElementId) {
        self.selected.retain(|&e| e != element);
        self.unhighlight(doc, element);
    }

    fn unhighlight(&self, doc: &mut SvgDocument, element: ElementId) {
        match self
            .snapshots
            .get(element)
            .and_then(|s| s.stroke_attr.clone())
        {
            Some(original) => doc.set_attribute(element, "stroke", &original),
            None => doc.remove_attribute(element, "stroke"),
        }
    }

    /// Forget the selection without touching any document, for use after
    /// the document has been replaced
    pub fn reset(&mut self) {
        self.selected.clear();
        self.snapshots = StyleSnapshots::new();
    }
}

/// Topmost rendered leaf graphics element under a screen point.
///
/// Elements are tested against their projected root-space box; later
/// elements in document order paint on top.
pub fn hit_test(doc: &SvgDocument, point: ScreenPoint) -> Option<ElementId> {
    let screen_to_root = doc.root_to_screen()?.inverse()?;
    let p = screen_to_root.apply(point);
    doc.elements()
        .filter(|&e| doc.is_leaf_graphics(e) && doc.is_rendered(e))
        .filter(|&e| {
            let rect: RootRect = project(doc, e);
            rect.contains(p)
        })
        .last()
}
