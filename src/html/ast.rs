//! HTML AST
//!
//! A frozen tree of the three node shapes the rest of the pipeline needs:
//! documents, elements and text. Comments and processing instructions never
//! make it past the parser adapter, so they have no variant here. Dispatch
//! everywhere downstream is an exhaustive match on [`HtmlNode`], not a
//! visitor or a trait object — adding a variant is a compiler-checked change
//! across every matcher.

use std::collections::BTreeMap;

/// A single HTML node: either literal text or an element with attributes
/// and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Text(HtmlText),
    Element(HtmlElement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlText {
    pub text: String,
}

/// `attrs` preserves insertion order (the order attributes appeared in the
/// source) while still supporting lookup by lowercased name; a `BTreeMap`
/// would re-sort them, which would make a round-tripped `style` attribute
/// unrecognizable, so this keeps an ordered `Vec` of pairs instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute by lowercased name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// The element's `class` attribute split on whitespace, as a set for
    /// membership tests.
    pub fn classes(&self) -> BTreeMap<&str, ()> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(|cls| (cls, ())).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|cls| cls == name))
            .unwrap_or(false)
    }

    /// Concatenated text content of this element's subtree (element nodes
    /// contribute nothing but their own text descendants).
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[HtmlNode], out: &mut String) {
    for node in nodes {
        match node {
            HtmlNode::Text(t) => out.push_str(&t.text),
            HtmlNode::Element(e) => collect_text(&e.children, out),
        }
    }
}

/// Top-level parse result: an ordered sequence of nodes plus an optional
/// doctype string (only meaningful for non-fragment parses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    pub children: Vec<HtmlNode>,
    pub doctype: Option<String>,
}

impl HtmlDocument {
    pub fn new(children: Vec<HtmlNode>) -> Self {
        Self {
            children,
            doctype: None,
        }
    }
}
