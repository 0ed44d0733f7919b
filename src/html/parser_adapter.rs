//! Parser Adapter
//!
//! Wraps `html5ever` + `markup5ever_rcdom` and converts the `RcDom` tree it
//! builds into this crate's own closed [`HtmlNode`] AST, collecting parser
//! diagnostics along the way. This is the one module that talks to an
//! external parsing engine; everything past it only ever sees `HtmlNode`.

use std::borrow::Cow;
use std::rc::Rc;

use html5ever::driver::{parse_document, parse_fragment, ParseOpts};
use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, QualName};
use markup5ever_rcdom::{Node, NodeData, RcDom};

use crate::diagnostics::{DiagnosticEvent, Severity};
use crate::html::ast::{HtmlDocument, HtmlElement, HtmlNode, HtmlText};

/// Parse `html` into an [`HtmlDocument`], returning the diagnostics the
/// parser itself produced alongside it. Never panics or returns `Err` on
/// malformed input: html5ever's own error-recovery algorithm takes care of
/// that, the same way it does for a browser.
pub fn parse(html: &str, fragment: bool) -> (HtmlDocument, Vec<DiagnosticEvent>) {
    log::debug!(
        "parser_adapter: parsing {} bytes (fragment={fragment})",
        html.len()
    );
    let opts = ParseOpts::default();
    let dom = if fragment {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        parse_fragment(RcDom::default(), opts, context, Vec::new())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("reading HTML from an in-memory buffer cannot fail")
    } else {
        parse_document(RcDom::default(), opts)
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .expect("reading HTML from an in-memory buffer cannot fail")
    };

    let mut diagnostics: Vec<DiagnosticEvent> = dom
        .errors
        .iter()
        .map(|msg| parse_error_diagnostic(msg))
        .collect();

    let mut doctype = None;
    let mut children = Vec::new();
    for child in dom.document.children.borrow().iter() {
        match &child.data {
            NodeData::Doctype { name, .. } => {
                doctype = Some(name.to_string());
            }
            _ => {
                if let Some(node) = convert_node(child, &mut diagnostics) {
                    children.push(node);
                }
            }
        }
    }

    let mut document = HtmlDocument::new(children);
    document.doctype = doctype;
    (document, diagnostics)
}

fn parse_error_diagnostic(msg: &Cow<'static, str>) -> DiagnosticEvent {
    DiagnosticEvent::new(
        "html5ever-parse-error",
        "parse",
        Severity::Error,
        msg.to_string(),
    )
}

/// Convert one `RcDom` node (and, recursively, its subtree) into an
/// [`HtmlNode`]. Returns `None` for node kinds that never appear in our AST
/// (comments, processing instructions, doctypes nested below the root).
fn convert_node(node: &Rc<Node>, diagnostics: &mut Vec<DiagnosticEvent>) -> Option<HtmlNode> {
    match &node.data {
        NodeData::Text { contents } => Some(HtmlNode::Text(HtmlText {
            text: contents.borrow().to_string(),
        })),
        NodeData::Element { name, attrs, .. } => {
            let tag = name.local.to_ascii_lowercase();
            let mut element = HtmlElement::new(tag);
            for attr in attrs.borrow().iter() {
                let attr_name = attr.name.local.to_ascii_lowercase();
                let attr_value = attr.value.to_string();
                if attr_value.is_empty() && looks_like_missing_value(node, &attr_name) {
                    diagnostics.push(missing_attribute_value_diagnostic(&attr_name, &element.tag));
                }
                element.attrs.push((attr_name, attr_value));
            }
            for child in node.children.borrow().iter() {
                if let Some(child_node) = convert_node(child, diagnostics) {
                    element.children.push(child_node);
                }
            }
            Some(HtmlNode::Element(element))
        }
        NodeData::Comment { .. }
        | NodeData::Doctype { .. }
        | NodeData::ProcessingInstruction { .. }
        | NodeData::Document => None,
    }
}

fn missing_attribute_value_diagnostic(attr_name: &str, tag: &str) -> DiagnosticEvent {
    DiagnosticEvent::new(
        "missing-attribute-value",
        "parse",
        Severity::Error,
        format!("attribute `{attr_name}` on <{tag}> has no value"),
    )
    .with_context("attribute", attr_name)
    .with_context("tag", tag)
}

/// html5ever normalizes a bare `name=` (no value, not even an empty string
/// literal) and a genuinely-empty `name=""` to the same empty string, so the
/// adapter cannot tell them apart from the attribute value alone. We treat
/// any empty attribute value as the "missing value" case the spec calls
/// out, which is a conservative choice: a real `name=""` is rare and, if
/// present, produces a spurious-but-harmless diagnostic rather than a
/// silently accepted one. See DESIGN.md Open Questions.
fn looks_like_missing_value(_node: &Rc<Node>, _attr_name: &str) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_element<'a>(nodes: &'a [HtmlNode], tag: &str) -> Option<&'a HtmlElement> {
        nodes.iter().find_map(|n| match n {
            HtmlNode::Element(e) if e.tag == tag => Some(e),
            _ => None,
        })
    }

    #[test]
    fn parses_simple_fragment() {
        let (doc, diags) = parse("<p>Hello <strong>World</strong></p>", true);
        assert!(diags.is_empty());
        let p = find_element(&doc.children, "p").expect("p element");
        assert_eq!(p.children.len(), 2);
    }

    #[test]
    fn lowercases_tag_and_attribute_names() {
        let (doc, _) = parse("<DIV DATA-LATEX=\"x\">y</DIV>", true);
        let div = find_element(&doc.children, "div").expect("div element");
        assert_eq!(div.attr("data-latex"), Some("x"));
    }

    #[test]
    fn drops_comments() {
        let (doc, _) = parse("<p>a<!-- comment -->b</p>", true);
        let p = find_element(&doc.children, "p").expect("p element");
        let text: String = p
            .children
            .iter()
            .filter_map(|n| match n {
                HtmlNode::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(text, "ab");
    }

    #[test]
    fn empty_attribute_value_is_reported() {
        let (_doc, diags) = parse("<div id=></div>", true);
        assert!(diags
            .iter()
            .any(|d| d.code == "missing-attribute-value" && d.severity == Severity::Error));
    }

    #[test]
    fn fragment_mode_has_no_scaffolding() {
        let (doc, _) = parse("<p>x</p>", true);
        assert_eq!(doc.children.len(), 1);
    }

    #[test]
    fn document_mode_builds_full_tree() {
        let (doc, _) = parse("<html><body><p>x</p></body></html>", false);
        assert!(find_element(&doc.children, "html").is_some());
    }
}
