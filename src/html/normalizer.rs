//! Normalizer
//!
//! Whitespace-aware rewrite over the HTML AST: same set of semantic nodes,
//! cleaner text. Pure function — call it twice on the same tree and get the
//! same tree back (`tests::idempotent_on_already_normalized_input` pins this
//! down for a few representative shapes; the crate's property tests in
//! `tests/property_tests.rs` check it for arbitrary generated trees).

use std::collections::HashSet;

use crate::html::ast::{HtmlDocument, HtmlElement, HtmlNode, HtmlText};
use crate::html::classifier::is_block_tag;

/// Tags whose subtree is passed through completely unchanged.
pub fn default_preserve_whitespace_tags() -> HashSet<String> {
    ["pre"].into_iter().map(String::from).collect()
}

pub fn normalize(doc: &HtmlDocument) -> HtmlDocument {
    normalize_with(doc, &default_preserve_whitespace_tags())
}

pub fn normalize_with(doc: &HtmlDocument, preserve_whitespace_tags: &HashSet<String>) -> HtmlDocument {
    let children = normalize_children(&doc.children, true, preserve_whitespace_tags);
    HtmlDocument {
        children,
        doctype: doc.doctype.clone(),
    }
}

fn normalize_children(
    nodes: &[HtmlNode],
    parent_is_block: bool,
    preserve: &HashSet<String>,
) -> Vec<HtmlNode> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            HtmlNode::Text(t) => {
                let collapsed = collapse_whitespace(&t.text);
                out.push(HtmlNode::Text(HtmlText { text: collapsed }));
            }
            HtmlNode::Element(el) => {
                out.push(normalize_element(el, preserve));
            }
        }
    }

    drop_boundary_whitespace(&mut out, parent_is_block);
    drop_boundary_br(&mut out, parent_is_block);
    drop_whitespace_between_blocks(&mut out, parent_is_block);
    merge_adjacent_text(&mut out)
}

fn normalize_element(el: &HtmlElement, preserve: &HashSet<String>) -> HtmlNode {
    if preserve.contains(&el.tag) {
        return HtmlNode::Element(el.clone());
    }
    let is_block = is_block_tag(&el.tag);
    let children = normalize_children(&el.children, is_block, preserve);
    HtmlNode::Element(HtmlElement {
        tag: el.tag.clone(),
        attrs: el.attrs.clone(),
        children,
    })
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

fn is_whitespace_only_text(node: &HtmlNode) -> bool {
    matches!(node, HtmlNode::Text(t) if t.text.chars().all(char::is_whitespace))
}

fn is_br(node: &HtmlNode) -> bool {
    matches!(node, HtmlNode::Element(e) if e.tag == "br")
}

fn node_is_block(node: &HtmlNode) -> bool {
    matches!(node, HtmlNode::Element(e) if is_block_tag(&e.tag))
}

/// Rule 4: in a block container, strip leading/trailing whitespace text.
fn drop_boundary_whitespace(nodes: &mut Vec<HtmlNode>, parent_is_block: bool) {
    if !parent_is_block {
        return;
    }
    while nodes.first().is_some_and(is_whitespace_only_text) {
        nodes.remove(0);
    }
    while nodes.last().is_some_and(is_whitespace_only_text) {
        nodes.pop();
    }
}

/// Rule 5: leading/trailing `<br>` children of a block are dropped.
fn drop_boundary_br(nodes: &mut Vec<HtmlNode>, parent_is_block: bool) {
    if !parent_is_block {
        return;
    }
    while nodes.first().is_some_and(is_br) {
        nodes.remove(0);
    }
    while nodes.last().is_some_and(is_br) {
        nodes.pop();
    }
    // Re-strip whitespace uncovered by removing a boundary <br>.
    drop_boundary_whitespace(nodes, parent_is_block);
}

/// Rules 2 and 3: whitespace-only text between two block siblings is
/// dropped; between any other pair it is preserved as a single space
/// (it has already been collapsed to one by `collapse_whitespace`). The
/// list-edge cases (no block sibling on one side) only count as "between
/// blocks" when the container itself is block, per rule 4 — inside an
/// inline container, edge whitespace next to a single block child is still
/// meaningful (e.g. `<span> <em>A</em></span>`) and must survive.
fn drop_whitespace_between_blocks(nodes: &mut [HtmlNode], parent_is_block: bool) {
    let mut to_clear = Vec::new();
    for i in 0..nodes.len() {
        if !is_whitespace_only_text(&nodes[i]) {
            continue;
        }
        let prev_block = nodes[..i].iter().rev().find(|n| !is_whitespace_only_text(n)).map(node_is_block);
        let next_block = nodes[i + 1..].iter().find(|n| !is_whitespace_only_text(n)).map(node_is_block);
        let between_blocks = matches!((prev_block, next_block), (Some(true), Some(true)))
            || (parent_is_block && prev_block == Some(true) && next_block.is_none())
            || (parent_is_block && prev_block.is_none() && next_block == Some(true));
        if between_blocks {
            to_clear.push(i);
        }
    }
    // Emptied here; merge_adjacent_text drops the resulting empty text nodes.
    for i in to_clear {
        nodes[i] = HtmlNode::Text(HtmlText { text: String::new() });
    }
}

/// Rule 7: adjacent text nodes that survive are merged into one. Also drops
/// any node left empty by `drop_whitespace_between_blocks`.
fn merge_adjacent_text(nodes: Vec<HtmlNode>) -> Vec<HtmlNode> {
    let mut out: Vec<HtmlNode> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let HtmlNode::Text(t) = &node {
            if t.text.is_empty() {
                continue;
            }
        }
        match (out.last_mut(), &node) {
            (Some(HtmlNode::Text(prev)), HtmlNode::Text(cur)) => {
                prev.text.push_str(&cur.text);
            }
            _ => out.push(node),
        }
    }
    out
}
