//! A measuring session: one document, its selection and the device viewport
//!
//! Every change is followed by [`Session::update`], which recomputes the
//! whole pipeline for the current selection. Nothing is cached between
//! updates.

use std::path::Path;

use crate::config::MeasureConfig;
use crate::document::{DocumentError, ElementId, SvgDocument, Viewport};
use crate::export::{export_element, Export};
use crate::geometry::ScreenPoint;
use crate::inspector::Inspector;
use crate::measure::{measure_selection, Report, Scene};
use crate::overlay::render_overlay;
use crate::selection::{hit_test, Selection};

/// Output of one recomputation
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub report: Report<ElementId>,
    pub inspector: Inspector,
}

#[derive(Debug, Clone)]
pub struct Session {
    document: Option<SvgDocument>,
    selection: Selection,
    config: MeasureConfig,
}

impl Session {
    pub fn new(config: MeasureConfig) -> Self {
        Self {
            document: None,
            selection: Selection::new(config.highlight.color.clone()),
            config,
        }
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&SvgDocument> {
        self.document.as_ref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the document with parsed `source`; the selection starts empty.
    ///
    /// On error the previous document stays loaded.
    pub fn load(&mut self, source: &str) -> Result<&SvgDocument, DocumentError> {
        let mut document = SvgDocument::parse(source)?;
        document.set_viewport(self.config.viewport);
        self.selection.reset();
        Ok(&*self.document.insert(document))
    }

    pub fn load_file(&mut self, path: &Path) -> Result<&SvgDocument, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        self.load(&content)
    }

    /// Resize the device area
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.config.viewport.width = width;
        self.config.viewport.height = height;
        self.sync_viewport();
    }

    /// Scroll the displayed content
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.config.viewport.scroll_x = x;
        self.config.viewport.scroll_y = y;
        self.sync_viewport();
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    fn sync_viewport(&mut self) {
        if let Some(document) = &mut self.document {
            document.set_viewport(self.config.viewport);
        }
    }

    /// Click on an element; see [`Selection::click`]
    pub fn click(&mut self, element: ElementId, multi: bool) -> bool {
        match &mut self.document {
            Some(document) => self.selection.click(document, element, multi),
            None => false,
        }
    }

    /// Click at a screen position; a click on empty space changes nothing
    pub fn click_at(&mut self, point: ScreenPoint, multi: bool) -> Option<ElementId> {
        let target = hit_test(self.document.as_ref()?, point)?;
        self.click(target, multi).then_some(target)
    }

    /// Select an element by its `id` attribute, adding to the selection
    pub fn select_id(&mut self, id: &str) -> Option<ElementId> {
        let element = self.document.as_ref()?.element_by_id(id)?;
        if !self.selection.contains(element) {
            self.click(element, true).then_some(element)
        } else {
            Some(element)
        }
    }

    /// Clear the selection (Escape or the clear button)
    pub fn clear(&mut self) {
        if let Some(document) = &mut self.document {
            self.selection.clear(document);
        }
    }

    /// Recompute the measurement and inspector state from scratch
    pub fn update(&self) -> Update {
        let Some(document) = &self.document else {
            return Update {
                report: Report::empty(),
                inspector: Inspector::empty(),
            };
        };
        let elements = self.selection.elements();
        let snapshots = self.selection.snapshots();
        Update {
            report: measure_selection(document, elements, snapshots),
            inspector: Inspector::for_selection(document, elements, snapshots),
        }
    }

    /// Overlay SVG for the current report
    pub fn overlay(&self, update: &Update) -> String {
        let root_to_screen = self.document.as_ref().and_then(|d| d.root_to_screen());
        render_overlay(
            &update.report,
            root_to_screen.as_ref(),
            &self.config.viewport,
            &self.config.overlay,
        )
    }

    /// Export an element cropped to its painted extent
    pub fn export(&self, element: ElementId) -> Option<Export> {
        let document = self.document.as_ref()?;
        Some(export_element(
            document,
            element,
            self.selection.snapshots(),
            self.config.export.padding,
        ))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MeasureConfig::default())
    }
}
