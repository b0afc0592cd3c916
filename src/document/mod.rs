//! Owned SVG document model
//!
//! The XML is parsed once with roxmltree and copied into an arena of
//! elements addressed by [`ElementId`]. The arena is mutable (selection
//! highlighting rewrites `stroke`), keeps each element's parsed transform
//! in sync with its attribute, and answers the geometry queries of
//! [`Scene`](crate::measure::Scene).

pub mod bbox;
pub mod serialize;
pub mod style;
pub mod viewport;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::geometry::{Affine, Local, LocalRect, Root, RootRect, Screen};
use crate::measure::{ComputedStyle, Scene};
use crate::parser::{compose, parse_float_prefix, parse_length, parse_transform};
use crate::ParseError;

pub use viewport::{AxisAlign, MeetOrSlice, PreserveAspectRatio, ViewBox, Viewport};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// Containers whose content is never rendered directly
const NON_RENDERING: &[&str] = &[
    "defs",
    "symbol",
    "clipPath",
    "mask",
    "marker",
    "pattern",
    "linearGradient",
    "radialGradient",
    "filter",
    "title",
    "desc",
    "metadata",
    "style",
];

/// Elements that draw something themselves
const LEAF_GRAPHICS: &[&str] = &[
    "rect",
    "circle",
    "ellipse",
    "line",
    "polyline",
    "polygon",
    "path",
    "text",
    "image",
    "use",
    "foreignObject",
];

/// Containers that have a bounding box of their own
const CONTAINER_GRAPHICS: &[&str] = &["g", "svg", "a", "switch"];

/// Errors that can occur when loading a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read SVG file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Malformed XML: {0}")]
    XmlError(#[from] roxmltree::Error),
    #[error("No <svg> element found in document")]
    MissingSvgRoot,
}

/// Handle of an element in a [`SvgDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(ElementId),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    namespace: Option<String>,
    attributes: Vec<(String, String)>,
    parent: Option<ElementId>,
    children: Vec<Child>,
    /// Parsed `transform` attribute, local to parent content space
    transform: Affine<Local, Local>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub(crate) fn is_svg(&self) -> bool {
        self.namespace.as_deref().map_or(true, |ns| ns == SVG_NS)
    }
}

/// An attribute value that failed to parse and was ignored
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub element: ElementId,
    pub attribute: String,
    pub value: String,
    pub error: ParseError,
}

impl Diagnostic {
    /// Render with the attribute value as source context
    pub fn format(&self) -> String {
        let name = format!("{} {}", self.element, self.attribute);
        self.error.format(&self.value, &name)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ignored {}=\"{}\" on {}: {}",
            self.attribute, self.value, self.element, self.error
        )
    }
}

#[derive(Debug, Clone)]
pub struct SvgDocument {
    elements: Vec<Element>,
    root: ElementId,
    ids: HashMap<String, ElementId>,
    canvas: ViewBox,
    viewport: Viewport,
    diagnostics: Vec<Diagnostic>,
}

impl SvgDocument {
    /// Load a document from a file
    pub fn from_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse SVG source.
    ///
    /// The first `<svg>` element becomes the root; `<script>` elements are
    /// dropped. A missing `viewBox` on the root is synthesized from the
    /// intrinsic size.
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let xml = roxmltree::Document::parse_with_options(source, options)?;
        let svg = xml
            .descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "svg")
            .ok_or(DocumentError::MissingSvgRoot)?;

        let mut doc = SvgDocument {
            elements: Vec::new(),
            root: ElementId(0),
            ids: HashMap::new(),
            canvas: ViewBox::new(0.0, 0.0, viewport::FALLBACK_WIDTH, viewport::FALLBACK_HEIGHT),
            viewport: Viewport::default(),
            diagnostics: Vec::new(),
        };
        doc.root = doc.import(svg, None);
        doc.rebuild_ids();
        doc.canvas = doc.intrinsic_canvas();
        if doc.attribute(doc.root, "viewBox").is_none() {
            let vb = doc.canvas;
            let value = format!("0 0 {} {}", vb.width, vb.height);
            doc.set_attribute(doc.root, "viewBox", &value);
        }

        tracing::debug!(
            elements = doc.elements.len(),
            width = doc.canvas.width,
            height = doc.canvas.height,
            diagnostics = doc.diagnostics.len(),
            "parsed svg document"
        );
        Ok(doc)
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<ElementId>) -> ElementId {
        let id = ElementId(self.elements.len());
        let attributes = node
            .attributes()
            .map(|attr| {
                let name = match attr.namespace() {
                    Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                    Some(XML_NS) => format!("xml:{}", attr.name()),
                    _ => attr.name().to_string(),
                };
                (name, attr.value().to_string())
            })
            .collect();
        self.elements.push(Element {
            tag: node.tag_name().name().to_string(),
            namespace: node.tag_name().namespace().map(str::to_string),
            attributes,
            parent,
            children: Vec::new(),
            transform: Affine::identity(),
        });

        for child in node.children() {
            if child.is_element() {
                if child.tag_name().name() == "script" {
                    tracing::debug!("dropping <script> element");
                    continue;
                }
                let child_id = self.import(child, Some(id));
                self.elements[id.0].children.push(Child::Element(child_id));
            } else if let Some(text) = child.text().filter(|_| child.is_text()) {
                self.elements[id.0].children.push(Child::Text(text.to_string()));
            }
        }

        self.refresh_transform(id);
        id
    }

    fn rebuild_ids(&mut self) {
        self.ids.clear();
        for (index, element) in self.elements.iter().enumerate() {
            if let Some((_, value)) = element.attributes.iter().find(|(k, _)| k == "id") {
                // First occurrence wins
                self.ids.entry(value.clone()).or_insert(ElementId(index));
            }
        }
    }

    fn intrinsic_canvas(&self) -> ViewBox {
        if let Some(vb) = self
            .attribute(self.root, "viewBox")
            .and_then(ViewBox::parse)
            .filter(ViewBox::is_usable)
        {
            return vb;
        }
        let size = |name: &str, fallback: f64| {
            self.attribute(self.root, name)
                .and_then(parse_float_prefix)
                .filter(|v| v.is_finite() && *v != 0.0)
                .unwrap_or(fallback)
        };
        ViewBox::new(
            0.0,
            0.0,
            size("width", viewport::FALLBACK_WIDTH),
            size("height", viewport::FALLBACK_HEIGHT),
        )
    }

    fn refresh_transform(&mut self, id: ElementId) {
        self.diagnostics
            .retain(|d| !(d.element == id && d.attribute == "transform"));
        let transform = match self.attribute(id, "transform") {
            None => Affine::identity(),
            Some(value) => match parse_transform(value) {
                Ok(ops) => compose(&ops),
                Err(errors) => {
                    let value = value.to_string();
                    tracing::warn!(element = %id, %value, "unparsable transform, using identity");
                    for error in errors {
                        self.diagnostics.push(Diagnostic {
                            element: id,
                            attribute: "transform".to_string(),
                            value: value.clone(),
                            error,
                        });
                    }
                    Affine::identity()
                }
            },
        };
        self.elements[id.0].transform = transform;
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn tag(&self, id: ElementId) -> &str {
        &self.elements[id.0].tag
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in document order
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements[id.0].parent
    }

    /// Parent chain, nearest first
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), |&p| self.parent(p))
    }

    pub fn child_elements(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.elements[id.0].children.iter().filter_map(|c| match c {
            Child::Element(e) => Some(*e),
            Child::Text(_) => None,
        })
    }

    /// Concatenated descendant text
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        for child in &self.elements[id.0].children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(e) => out.push_str(&self.text_content(*e)),
            }
        }
        out
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Element referenced by `href` or `xlink:href` as `#id`
    pub fn href_target(&self, id: ElementId) -> Option<ElementId> {
        let raw = self
            .attribute(id, "href")
            .or_else(|| self.attribute(id, "xlink:href"))?;
        let target = raw.trim().strip_prefix('#')?;
        self.element_by_id(target)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements[id.0]
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace an attribute, keeping derived state current
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let attributes = &mut self.elements[id.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        self.attribute_changed(id, name);
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        self.elements[id.0].attributes.retain(|(k, _)| k != name);
        self.attribute_changed(id, name);
    }

    fn attribute_changed(&mut self, id: ElementId, name: &str) {
        match name {
            "transform" => self.refresh_transform(id),
            "id" => self.rebuild_ids(),
            _ => {}
        }
    }

    /// Attribute values that failed to parse
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The root viewBox: the canvas all measurements are expressed in
    pub fn canvas_box(&self) -> ViewBox {
        self.canvas
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_leaf_graphics(&self, id: ElementId) -> bool {
        let el = self.element(id);
        el.is_svg() && LEAF_GRAPHICS.contains(&el.tag.as_str())
    }

    /// Elements with a bounding box: drawable leaves and grouping containers
    pub fn is_graphics(&self, id: ElementId) -> bool {
        let el = self.element(id);
        self.is_leaf_graphics(id) || (el.is_svg() && CONTAINER_GRAPHICS.contains(&el.tag.as_str()))
    }

    /// Whether the element takes part in rendering at all
    pub fn is_rendered(&self, id: ElementId) -> bool {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .all(|e| !self.is_hidden(e))
    }

    /// Hidden by its own tag or `display`, regardless of ancestors
    pub(crate) fn is_hidden(&self, id: ElementId) -> bool {
        let el = self.element(id);
        let hidden_tag = el.is_svg() && NON_RENDERING.contains(&el.tag.as_str());
        hidden_tag || style::is_display_none(self, id)
    }

    /// The element's own `transform`, into its parent's content space
    pub(crate) fn local_transform(&self, id: ElementId) -> Affine<Local, Local> {
        self.elements[id.0].transform
    }

    /// Resolve a length attribute; percentages are relative to `reference`
    pub(crate) fn length(&self, id: ElementId, name: &str, reference: f64) -> Option<f64> {
        self.attribute(id, name)
            .and_then(parse_length)
            .map(|l| l.to_user_units(reference))
            .filter(|v| v.is_finite())
    }

    /// Mapping from a nested viewport's content into its own local space
    pub(crate) fn content_to_local(&self, id: ElementId) -> Affine<Local, Local> {
        if id == self.root || self.tag(id) != "svg" {
            return Affine::identity();
        }
        let canvas = self.canvas;
        let x = self.length(id, "x", canvas.width).unwrap_or(0.0);
        let y = self.length(id, "y", canvas.height).unwrap_or(0.0);
        let width = self.length(id, "width", canvas.width).unwrap_or(canvas.width);
        let height = self.length(id, "height", canvas.height).unwrap_or(canvas.height);

        match self
            .attribute(id, "viewBox")
            .and_then(ViewBox::parse)
            .filter(ViewBox::is_usable)
        {
            Some(vb) => {
                let par = self
                    .attribute(id, "preserveAspectRatio")
                    .map(PreserveAspectRatio::parse)
                    .unwrap_or_default();
                par.fit(&vb, (x, y, width, height))
            }
            None => Affine::translate(x, y),
        }
    }

    /// Local space of the element to the root's user space
    pub fn element_to_root(&self, id: ElementId) -> Affine<Local, Root> {
        if id == self.root {
            return Affine::identity();
        }
        let mut m = self.elements[id.0].transform;
        for ancestor in self.ancestors(id) {
            if ancestor == self.root {
                break;
            }
            m = m
                .then(self.content_to_local(ancestor))
                .then(self.elements[ancestor.0].transform);
        }
        m.retag()
    }

    /// The coordinate system the element's `transform` maps into, relative
    /// to the root's user space
    pub fn parent_content_to_root(&self, id: ElementId) -> Affine<Local, Root> {
        match self.parent(id) {
            Some(parent) if parent != self.root => self
                .content_to_local(parent)
                .then(self.element_to_root(parent)),
            _ => Affine::identity(),
        }
    }

    /// Root user space to the device: `xMinYMin meet` into the viewport,
    /// then scrolled
    pub fn root_screen_transform(&self) -> Affine<Root, Screen> {
        let vp = self.viewport;
        PreserveAspectRatio::ROOT_FIT
            .fit::<Root, Screen>(&self.canvas, (0.0, 0.0, vp.width, vp.height))
            .then(Affine::translate(-vp.scroll_x, -vp.scroll_y))
    }
}

impl Scene for SvgDocument {
    type Element = ElementId;

    fn local_bbox(&self, element: ElementId) -> Option<LocalRect> {
        bbox::local_bbox(self, element)
    }

    fn element_to_screen(&self, element: ElementId) -> Option<Affine<Local, Screen>> {
        if !self.is_rendered(element) {
            return None;
        }
        Some(self.element_to_root(element).then(self.root_screen_transform()))
    }

    fn root_to_screen(&self) -> Option<Affine<Root, Screen>> {
        Some(self.root_screen_transform())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        SvgDocument::attribute(self, element, name)
    }

    fn computed_style(&self, element: ElementId) -> ComputedStyle {
        let mut style = style::computed_style(self, element);
        // The cascade yields user units of the element; report device pixels
        let scale = self
            .element_to_root(element)
            .then(self.root_screen_transform())
            .linear_scale();
        style.stroke_width = if scale.is_finite() { style.stroke_width * scale } else { 0.0 };
        style
    }

    fn canvas(&self) -> RootRect {
        let vb = self.canvas;
        RootRect::new(vb.min_x, vb.min_y, vb.width, vb.height)
    }
}
