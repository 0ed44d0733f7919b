//! Transformer
//!
//! HTML AST -> LaTeX AST. The largest component in the pipeline: every
//! tag-to-command mapping and the list/table/math/figure sub-algorithms live
//! here or in this module's children. A total function — every HTML node
//! produces zero or more LaTeX nodes, never an error; anything the
//! transformer can't make sense of degrades to "emit the children" rather
//! than failing the conversion.

mod figure;
mod list;
mod math;
mod table;

use crate::diagnostics::{DiagnosticEvent, Severity};
use crate::html::ast::{HtmlElement, HtmlNode};
use crate::html::classifier;
use crate::latex::ast::LatexNode;
use crate::latex::serialize;

/// Entry point: transform a whole document at list/quote level zero.
pub fn transform(children: &[HtmlNode]) -> Vec<LatexNode> {
    transform_nodes(children, 0, 0)
}

pub(crate) fn transform_nodes(nodes: &[HtmlNode], list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    nodes
        .iter()
        .flat_map(|n| transform_node(n, list_level, quote_level))
        .collect()
}

fn transform_node(node: &HtmlNode, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    match node {
        HtmlNode::Text(t) => vec![LatexNode::text(t.text.clone())],
        HtmlNode::Element(el) => transform_element(el, list_level, quote_level),
    }
}

fn transform_element(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    if math::is_math_container(el) {
        return math::transform_math(el);
    }

    if let Some(cmd) = classifier::inline_command_for(&el.tag) {
        return vec![LatexNode::command1(cmd, transform_nodes(&el.children, list_level, quote_level))];
    }

    match el.tag.as_str() {
        "small" => wrap_raw("{\\small ", el, list_level, quote_level, "}"),
        "big" => wrap_raw("{\\large ", el, list_level, quote_level, "}"),
        "mark" => vec![LatexNode::Command(crate::latex::ast::LatexCommand {
            name: "colorbox".into(),
            args: vec![
                crate::latex::ast::LatexGroup {
                    children: vec![LatexNode::raw("yellow")],
                },
                crate::latex::ast::LatexGroup {
                    children: transform_nodes(&el.children, list_level, quote_level),
                },
            ],
            options: Vec::new(),
        })],
        "center" => vec![LatexNode::environment(
            "center",
            transform_nodes(&el.children, list_level, quote_level),
        )],
        tag if classifier::is_inline_passthrough(tag) => transform_nodes(&el.children, list_level, quote_level),
        tag if classifier::heading_command_for(tag).is_some() => vec![LatexNode::command1(
            classifier::heading_command_for(tag).expect("checked by guard"),
            transform_nodes(&el.children, list_level, quote_level),
        )],
        "br" => vec![LatexNode::command0("newline")],
        "q" => transform_quote(el, list_level, quote_level),
        "p" | "div" => transform_paragraph(el, list_level, quote_level),
        "hr" => vec![LatexNode::command0("hrule")],
        "a" => transform_anchor(el, list_level, quote_level),
        "img" => transform_image(el),
        "blockquote" => vec![LatexNode::environment(
            "quote",
            transform_nodes(&el.children, list_level, quote_level),
        )],
        "pre" => vec![LatexNode::environment(
            "verbatim",
            vec![LatexNode::raw(el.text_content())],
        )],
        "table" => table::transform_table(el, list_level, quote_level),
        "ul" | "ol" | "dl" => list::transform_list(el, list_level, quote_level),
        "figure" => figure::transform_figure(el, list_level, quote_level),
        "figcaption" => figure::transform_orphan_figcaption(el, list_level, quote_level),
        tag if classifier::is_block_passthrough(tag) => transform_nodes(&el.children, list_level, quote_level),
        _ => transform_nodes(&el.children, list_level, quote_level),
    }
}

fn wrap_raw(
    open: &str,
    el: &HtmlElement,
    list_level: u32,
    quote_level: u32,
    close: &str,
) -> Vec<LatexNode> {
    let mut out = vec![LatexNode::raw(open.to_string())];
    out.extend(transform_nodes(&el.children, list_level, quote_level));
    out.push(LatexNode::raw(close.to_string()));
    out
}

fn transform_quote(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let (open, close) = if quote_level == 0 { ("``", "''") } else { ("`", "'") };
    let mut out = vec![LatexNode::raw(open)];
    out.extend(transform_nodes(&el.children, list_level, quote_level + 1));
    out.push(LatexNode::raw(close));
    out
}

fn transform_paragraph(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let children = transform_nodes(&el.children, list_level, quote_level);
    match text_align(el) {
        Some("center") => vec![LatexNode::environment("center", children)],
        Some("left") => vec![LatexNode::environment("flushleft", children)],
        Some("right") => vec![LatexNode::environment("flushright", children)],
        _ => {
            let mut out = children;
            out.push(LatexNode::command0("par"));
            out
        }
    }
}

fn transform_anchor(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let Some(href) = el.attr("href") else {
        return transform_nodes(&el.children, list_level, quote_level);
    };
    let children = transform_nodes(&el.children, list_level, quote_level);
    if children.is_empty() {
        vec![LatexNode::command1("url", vec![LatexNode::raw(href.to_string())])]
    } else {
        vec![LatexNode::Command(crate::latex::ast::LatexCommand {
            name: "href".into(),
            args: vec![
                crate::latex::ast::LatexGroup {
                    children: vec![LatexNode::raw(href.to_string())],
                },
                crate::latex::ast::LatexGroup { children },
            ],
            options: Vec::new(),
        })]
    }
}

fn transform_image(el: &HtmlElement) -> Vec<LatexNode> {
    let src = el.attr("src").filter(|s| !s.is_empty());
    let alt = el.attr("alt").filter(|s| !s.is_empty());
    match (src, alt) {
        (Some(src), _) => {
            let mut options = Vec::new();
            if let Some(w) = el.attr("width") {
                options.push(format!("width={w}"));
            }
            if let Some(h) = el.attr("height") {
                options.push(format!("height={h}"));
            }
            vec![LatexNode::Command(crate::latex::ast::LatexCommand {
                name: "includegraphics".into(),
                args: vec![crate::latex::ast::LatexGroup {
                    children: vec![LatexNode::raw(src.to_string())],
                }],
                options,
            })]
        }
        (None, Some(alt)) => vec![LatexNode::text(alt.to_string())],
        (None, None) => {
            crate::diagnostics::emit(DiagnosticEvent::new(
                "missing-image-source",
                "asset",
                Severity::Warn,
                "img element has neither a usable src nor alt text",
            ));
            Vec::new()
        }
    }
}

/// `text-align` from either the legacy `align` attribute or the `style`
/// attribute's `text-align` declaration.
fn text_align<'a>(el: &'a HtmlElement) -> Option<&'a str> {
    if let Some(style) = el.attr("style") {
        if let Some(value) = style_value(style, "text-align") {
            return match value.as_str() {
                "center" => Some("center"),
                "left" => Some("left"),
                "right" => Some("right"),
                _ => None,
            };
        }
    }
    None
}

/// Parse a `;`-separated inline `style` attribute and return the value of
/// `property`, trimmed and lowercased.
pub(crate) fn style_value(style: &str, property: &str) -> Option<String> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(property) {
            Some(value.trim().to_ascii_lowercase())
        } else {
            None
        }
    })
}

/// Render a slice of LaTeX nodes to a compact string. Used by sub-modules
/// that need a string payload (table cells, captions) rather than an AST
/// fragment.
pub(crate) fn render_to_string(nodes: &[LatexNode]) -> String {
    serialize(nodes, false)
}
