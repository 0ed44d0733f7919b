//! `<figure>`/`<figcaption>` handling (SPEC_FULL §4.5.3).

use crate::html::ast::HtmlElement;
use crate::latex::ast::LatexNode;
use crate::transform::{render_to_string, transform_nodes};

pub fn transform_figure(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let mut content = Vec::new();
    let mut caption = None;

    for child in &el.children {
        if let crate::html::ast::HtmlNode::Element(child_el) = child {
            if child_el.tag == "figcaption" {
                caption = Some(caption_command(child_el, list_level, quote_level));
                continue;
            }
        }
        content.extend(transform_nodes(
            std::slice::from_ref(child),
            list_level,
            quote_level,
        ));
    }

    if content.is_empty() && caption.is_none() {
        return Vec::new();
    }

    let mut children = vec![LatexNode::command0("centering")];
    children.extend(content);
    if let Some(cap) = caption {
        children.push(cap);
    }
    vec![LatexNode::environment("figure", children)]
}

/// A `figcaption` found outside any `figure` renders as plain children.
pub fn transform_orphan_figcaption(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    transform_nodes(&el.children, list_level, quote_level)
}

fn caption_command(figcaption: &HtmlElement, list_level: u32, quote_level: u32) -> LatexNode {
    let nodes = transform_nodes(&figcaption.children, list_level, quote_level);
    let rendered = render_to_string(&nodes);
    let collapsed = rendered.replace("\\par ", " ").trim().to_string();
    LatexNode::command1("caption", vec![LatexNode::raw(collapsed)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::ast::{HtmlNode, HtmlText};

    fn text_el(tag: &str, text: &str) -> HtmlElement {
        let mut el = HtmlElement::new(tag);
        el.children.push(HtmlNode::Text(HtmlText { text: text.into() }));
        el
    }

    #[test]
    fn figure_with_caption_wraps_children_and_caption() {
        let mut figure = HtmlElement::new("figure");
        figure.children.push(HtmlNode::Element(text_el("p", "Diagram")));
        figure
            .children
            .push(HtmlNode::Element(text_el("figcaption", "A caption")));
        let nodes = transform_figure(&figure, 0, 0);
        assert_eq!(nodes.len(), 1);
        match &nodes[0] {
            LatexNode::Environment(env) => {
                assert_eq!(env.name, "figure");
                assert!(matches!(env.children[0], LatexNode::Command(ref c) if c.name == "centering"));
            }
            _ => panic!("expected figure environment"),
        }
    }

    #[test]
    fn empty_figure_emits_nothing() {
        let figure = HtmlElement::new("figure");
        assert!(transform_figure(&figure, 0, 0).is_empty());
    }

    #[test]
    fn orphan_figcaption_renders_as_children() {
        let figcaption = text_el("figcaption", "Just text");
        let nodes = transform_orphan_figcaption(&figcaption, 0, 0);
        assert_eq!(nodes, vec![LatexNode::text("Just text")]);
    }
}
