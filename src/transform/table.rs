//! `<table>` handling (SPEC_FULL §4.5.1): a two-pass algorithm — collect the
//! grid first, then render with column alignment and rowspan/colspan
//! bookkeeping resolved — rather than trying to do both in one walk.

use std::collections::HashMap;

use crate::html::ast::{HtmlElement, HtmlNode};
use crate::latex::ast::{LatexGroup, LatexNode};
use crate::transform::{render_to_string, style_value, transform_nodes};

struct PlacedCell<'a> {
    col: usize,
    colspan: usize,
    rowspan: usize,
    align: char,
    header: bool,
    node: &'a HtmlElement,
}

pub fn transform_table(el: &HtmlElement, list_level: u32, quote_level: u32) -> Vec<LatexNode> {
    let (rows, caption) = collect_rows_and_caption(el);
    let (placed_rows, max_columns) = place_cells(&rows);
    if max_columns == 0 {
        return Vec::new();
    }
    let column_spec = detect_column_alignment(&placed_rows, max_columns);

    let row_nodes: Vec<LatexNode> = placed_rows
        .iter()
        .map(|row| render_row(row, max_columns, &column_spec, list_level, quote_level))
        .collect();

    let tabular = LatexNode::Environment(crate::latex::ast::LatexEnvironment {
        name: "tabular".into(),
        children: row_nodes,
        args: vec![LatexGroup {
            children: vec![LatexNode::raw(column_spec)],
        }],
        options: Vec::new(),
    });

    match caption {
        Some(cap_el) => {
            let caption_nodes = transform_nodes(&cap_el.children, list_level, quote_level);
            let rendered = render_to_string(&caption_nodes).replace("\\par ", " ");
            let caption_cmd =
                LatexNode::command1("caption", vec![LatexNode::raw(rendered.trim().to_string())]);
            vec![LatexNode::environment("table", vec![caption_cmd, tabular])]
        }
        None => vec![tabular],
    }
}

fn collect_rows_and_caption(table: &HtmlElement) -> (Vec<Vec<&HtmlElement>>, Option<&HtmlElement>) {
    let mut rows = Vec::new();
    let mut caption = None;
    for child in &table.children {
        let HtmlNode::Element(el) = child else { continue };
        match el.tag.as_str() {
            "caption" => caption = Some(el),
            "tr" => rows.push(collect_cells(el)),
            "thead" | "tbody" | "tfoot" => {
                for grandchild in &el.children {
                    if let HtmlNode::Element(tr) = grandchild {
                        if tr.tag == "tr" {
                            rows.push(collect_cells(tr));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    (rows, caption)
}

fn collect_cells(tr: &HtmlElement) -> Vec<&HtmlElement> {
    tr.children
        .iter()
        .filter_map(|c| match c {
            HtmlNode::Element(el) if el.tag == "td" || el.tag == "th" => Some(el),
            _ => None,
        })
        .collect()
}

fn parse_span(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}

fn detect_align(cell: &HtmlElement) -> char {
    if let Some(a) = cell.attr("align") {
        match a.to_ascii_lowercase().as_str() {
            "left" => return 'l',
            "center" => return 'c',
            "right" => return 'r',
            _ => {}
        }
    }
    if let Some(style) = cell.attr("style") {
        if let Some(v) = style_value(style, "text-align") {
            match v.as_str() {
                "left" => return 'l',
                "center" => return 'c',
                "right" => return 'r',
                _ => {}
            }
        }
    }
    'l'
}

fn place_cells<'a>(rows: &[Vec<&'a HtmlElement>]) -> (Vec<Vec<PlacedCell<'a>>>, usize) {
    let mut occupied: HashMap<usize, usize> = HashMap::new();
    let mut placed_rows = Vec::new();
    let mut max_columns = 0;

    for row in rows {
        let mut col_cursor = 0;
        let mut newly_occupied = Vec::new();
        let mut placed_row = Vec::new();
        let mut cells = row.iter();

        loop {
            if occupied.get(&col_cursor).copied().unwrap_or(0) > 0 {
                col_cursor += 1;
                continue;
            }
            let Some(cell) = cells.next() else { break };
            let colspan = parse_span(cell.attr("colspan"));
            let rowspan = parse_span(cell.attr("rowspan"));
            let align = detect_align(cell);
            let header = cell.tag == "th";
            let col = col_cursor;
            if rowspan > 1 {
                for c in col..col + colspan {
                    occupied.insert(c, rowspan - 1);
                    newly_occupied.push(c);
                }
            }
            placed_row.push(PlacedCell {
                col,
                colspan,
                rowspan,
                align,
                header,
                node: cell,
            });
            col_cursor += colspan;
        }

        max_columns = max_columns.max(col_cursor);
        for (col, remaining) in occupied.iter_mut() {
            if *remaining > 0 && !newly_occupied.contains(col) {
                *remaining -= 1;
            }
        }
        placed_rows.push(placed_row);
    }

    (placed_rows, max_columns)
}

fn detect_column_alignment(placed_rows: &[Vec<PlacedCell<'_>>], max_columns: usize) -> String {
    let mut tallies: Vec<HashMap<char, usize>> = vec![HashMap::new(); max_columns];
    for row in placed_rows {
        for cell in row {
            if cell.colspan == 1 && cell.col < max_columns {
                *tallies[cell.col].entry(cell.align).or_insert(0) += 1;
            }
        }
    }
    let mut spec = String::with_capacity(max_columns);
    for tally in &tallies {
        // Preference order on ties is l > c > r; pick the first candidate
        // that attains the maximum count rather than relying on iterator
        // tie-breaking, which favors the *last* equal element.
        let mut best = 'l';
        let mut best_count = 0;
        for candidate in ['l', 'c', 'r'] {
            let count = tally.get(&candidate).copied().unwrap_or(0);
            if count > best_count {
                best = candidate;
                best_count = count;
            }
        }
        spec.push(best);
    }
    spec
}

fn render_row(
    row: &[PlacedCell<'_>],
    max_columns: usize,
    column_spec: &str,
    list_level: u32,
    quote_level: u32,
) -> LatexNode {
    let mut entries = Vec::new();
    let mut pointer = 0;
    for cell in row {
        while pointer < cell.col {
            entries.push(String::new());
            pointer += 1;
        }
        entries.push(render_cell(cell, column_spec, list_level, quote_level));
        pointer = cell.col + cell.colspan;
    }
    while pointer < max_columns {
        entries.push(String::new());
        pointer += 1;
    }
    LatexNode::raw(format!("{}{}", entries.join(" & "), " \\\\"))
}

fn render_cell(cell: &PlacedCell<'_>, column_spec: &str, list_level: u32, quote_level: u32) -> String {
    let nodes = transform_nodes(&cell.node.children, list_level, quote_level);
    let content = render_to_string(&nodes);
    let content = if cell.header {
        format!("\\textbf{{{content}}}")
    } else {
        content
    };
    let align = column_spec
        .chars()
        .nth(cell.col)
        .unwrap_or('l');
    match (cell.colspan > 1, cell.rowspan > 1) {
        (true, true) => format!(
            "\\multicolumn{{{}}}{{{}}}{{\\multirow{{{}}}{{*}}{{{}}}}}",
            cell.colspan, align, cell.rowspan, content
        ),
        (true, false) => format!("\\multicolumn{{{}}}{{{}}}{{{}}}", cell.colspan, align, content),
        (false, true) => format!("\\multirow{{{}}}{{*}}{{{}}}", cell.rowspan, content),
        (false, false) => content,
    }
}
