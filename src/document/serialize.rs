//! XML output of element subtrees
//!
//! Whitespace text from the source is kept as-is, so output is written
//! without added indentation.

use super::{Child, ElementId, SvgDocument, SVG_NS};

/// Escape text for use inside an attribute value or element content
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize an element and its descendants, assuming it is placed inside
/// an SVG-namespaced parent
pub fn element_to_string(doc: &SvgDocument, id: ElementId) -> String {
    let mut out = String::new();
    write_element(doc, id, Some(SVG_NS), &mut out);
    out
}

/// Append one element subtree to `out`.
///
/// `parent_ns` is the default namespace in scope; an element in another
/// namespace re-declares it.
pub fn write_element(doc: &SvgDocument, id: ElementId, parent_ns: Option<&str>, out: &mut String) {
    let element = doc.element(id);
    let ns = element.namespace().or(parent_ns);

    out.push('<');
    out.push_str(element.tag());
    if element.namespace() != parent_ns {
        if let Some(ns) = element.namespace() {
            out.push_str(&format!(r#" xmlns="{}""#, escape(ns)));
        }
    }
    for (name, value) in element.attributes() {
        out.push_str(&format!(r#" {}="{}""#, name, escape(value)));
    }

    if element.children().is_empty() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    for child in element.children() {
        match child {
            Child::Element(child) => write_element(doc, *child, ns, out),
            Child::Text(text) => out.push_str(&escape(text)),
        }
    }
    out.push_str("</");
    out.push_str(element.tag());
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn test_subtree_output() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g id="g" fill="red"><rect width="1"/><text>a &amp; b</text></g></svg>"#,
        )
        .unwrap();
        let g = doc.element_by_id("g").unwrap();
        insta::assert_snapshot!(
            element_to_string(&doc, g),
            @r#"<g id="g" fill="red"><rect width="1"/><text>a &amp; b</text></g>"#
        );
    }

    #[test]
    fn test_foreign_namespace_redeclared() {
        let doc = SvgDocument::parse(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject id="f"><div xmlns="http://www.w3.org/1999/xhtml">hi</div></foreignObject></svg>"#,
        )
        .unwrap();
        let f = doc.element_by_id("f").unwrap();
        let out = element_to_string(&doc, f);
        assert!(out.contains(r#"<div xmlns="http://www.w3.org/1999/xhtml">hi</div>"#), "{}", out);
    }
}
