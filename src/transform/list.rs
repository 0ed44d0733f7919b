//! `<ul>`/`<ol>`/`<dl>` handling (SPEC_FULL §4.5.2).

use crate::html::ast::{HtmlElement, HtmlNode};
use crate::latex::ast::{LatexCommand, LatexGroup, LatexNode};
use crate::transform::transform_nodes;

fn counter_name(level: u32) -> &'static str {
    match level.clamp(1, 4) {
        1 => "enumi",
        2 => "enumii",
        3 => "enumiii",
        _ => "enumiv",
    }
}

fn ordered_type_command(kind: &str) -> Option<&'static str> {
    match kind {
        "1" => Some("arabic"),
        "a" => Some("alph"),
        "A" => Some("Alph"),
        "i" => Some("roman"),
        "I" => Some("Roman"),
        _ => None,
    }
}

/// `start="0"`/non-numeric -> clamped/treated as `1` (no `\setcounter` emitted).
fn parse_start(el: &HtmlElement) -> u32 {
    el.attr("start")
        .and_then(|v| v.parse::<i64>().ok())
        .map(|v| if v < 1 { 1 } else { v as u32 })
        .unwrap_or(1)
}

pub fn transform_list(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    match el.tag.as_str() {
        "ul" => transform_itemize(el, list_level, quote_level),
        "ol" => transform_enumerate(el, list_level, quote_level),
        "dl" => transform_description(el, list_level, quote_level),
        _ => unreachable!("transform_list called on non-list tag"),
    }
}

fn transform_itemize(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let new_level = list_level + 1;
    let mut children = Vec::new();
    for child in &el.children {
        if let HtmlNode::Element(li) = child {
            if li.tag == "li" {
                children.push(LatexNode::command0("item"));
                children.extend(transform_nodes(&li.children, new_level, quote_level));
            }
        }
    }
    vec![LatexNode::environment("itemize", children)]
}

fn transform_enumerate(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let new_level = list_level + 1;
    let counter = counter_name(new_level);
    let reversed = el.has_attr("reversed");
    let start = parse_start(el);

    let items: Vec<&HtmlElement> = el
        .children
        .iter()
        .filter_map(|c| match c {
            HtmlNode::Element(li) if li.tag == "li" => Some(li),
            _ => None,
        })
        .collect();

    let mut children = Vec::new();
    if let Some(cmd) = el.attr("type").and_then(ordered_type_command) {
        let label_cmd = format!("\\label{counter}");
        children.push(LatexNode::Command(LatexCommand {
            name: "renewcommand".into(),
            args: vec![
                LatexGroup {
                    children: vec![LatexNode::raw(label_cmd)],
                },
                LatexGroup {
                    children: vec![LatexNode::raw(format!("\\{cmd}{{{counter}}}."))],
                },
            ],
            options: Vec::new(),
        }));
    }
    if !reversed && start > 1 {
        children.push(LatexNode::command_args(
            "setcounter",
            vec![counter, &(start - 1).to_string()],
        ));
    }

    let initial_reversed_count = items.len() as i64 + 1;
    if reversed {
        children.push(LatexNode::command_args(
            "setcounter",
            vec![counter, &initial_reversed_count.to_string()],
        ));
    }

    for li in items {
        if reversed {
            children.push(LatexNode::command_args(
                "addtocounter",
                vec![counter, "-2"],
            ));
        } else if let Some(value) = li.attr("value").and_then(|v| v.parse::<i64>().ok()) {
            children.push(LatexNode::command_args(
                "setcounter",
                vec![counter, &(value - 1).to_string()],
            ));
        }
        children.push(LatexNode::command0("item"));
        children.extend(transform_nodes(&li.children, new_level, quote_level));
    }

    vec![LatexNode::environment("enumerate", children)]
}

fn transform_description(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let new_level = list_level + 1;
    let mut children = Vec::new();
    let mut pending_label: Option<String> = None;

    for child in &el.children {
        let HtmlNode::Element(entry) = child else { continue };
        match entry.tag.as_str() {
            "dt" => {
                pending_label = Some(entry.text_content().trim().to_string());
            }
            "dd" => {
                let item = match pending_label.take() {
                    Some(label) => LatexNode::Command(LatexCommand {
                        name: "item".into(),
                        args: Vec::new(),
                        options: vec![label],
                    }),
                    None => LatexNode::command0("item"),
                };
                children.push(item);
                children.extend(transform_nodes(&entry.children, new_level, quote_level));
            }
            _ => {}
        }
    }
    if let Some(label) = pending_label.take() {
        children.push(LatexNode::Command(LatexCommand {
            name: "item".into(),
            args: Vec::new(),
            options: vec![label],
        }));
    }

    vec![LatexNode::environment("description", children)]
}
