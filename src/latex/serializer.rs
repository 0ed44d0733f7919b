//! Serializer
//!
//! LaTeX AST -> string. Two modes: compact (canonical, whitespace-minimal,
//! used for the purity/round-trip property tests) and indented (human
//! readable, for callers who want to read the output). The escape table is
//! applied exactly once, to `LatexText` payloads only — `LatexRaw` and every
//! command/environment name flow through untouched.

use crate::latex::ast::{LatexCommand, LatexEnvironment, LatexNode};

/// Environments whose indented rendering puts each child on its own line
/// inside `\begin{name}`/`\end{name}`, with a blank line between `\item`s.
const LINE_PER_CHILD_ENVIRONMENTS: &[&str] = &[
    "itemize",
    "enumerate",
    "description",
    "quote",
    "quotation",
    "center",
    "flushleft",
    "flushright",
    "figure",
    "table",
    "tabular",
    "tabularx",
];

/// Commands whose zero-arg compact form should end a line in indented mode
/// rather than get a single trailing space.
const BLOCK_ENDING_COMMANDS: &[&str] = &[
    "par", "item", "section", "subsection", "subsubsection", "paragraph", "subparagraph",
    "setcounter", "addtocounter", "renewcommand", "newline", "hrule", "centering",
];

pub fn serialize(nodes: &[LatexNode], formatted: bool) -> String {
    let mut out = String::new();
    if formatted {
        write_indented(nodes, 0, &mut out);
    } else {
        for node in nodes {
            write_compact(node, &mut out);
        }
    }
    out
}

fn write_compact(node: &LatexNode, out: &mut String) {
    match node {
        LatexNode::Text(t) => out.push_str(&escape(&t.text)),
        LatexNode::Raw(r) => out.push_str(&r.value),
        LatexNode::Group(g) => {
            out.push('{');
            for child in &g.children {
                write_compact(child, out);
            }
            out.push('}');
        }
        LatexNode::Command(cmd) => write_command_compact(cmd, out),
        LatexNode::Environment(env) => write_environment_compact(env, out),
    }
}

fn write_command_compact(cmd: &LatexCommand, out: &mut String) {
    out.push('\\');
    out.push_str(&cmd.name);
    write_options(&cmd.options, out);
    if cmd.args.is_empty() {
        out.push(' ');
        return;
    }
    for arg in &cmd.args {
        out.push('{');
        for child in &arg.children {
            write_compact(child, out);
        }
        out.push('}');
    }
}

fn write_environment_compact(env: &LatexEnvironment, out: &mut String) {
    out.push_str("\\begin{");
    out.push_str(&env.name);
    out.push('}');
    write_options(&env.options, out);
    for arg in &env.args {
        out.push('{');
        for child in &arg.children {
            write_compact(child, out);
        }
        out.push('}');
    }
    for child in &env.children {
        write_compact(child, out);
    }
    out.push_str("\\end{");
    out.push_str(&env.name);
    out.push('}');
}

fn write_options(options: &[String], out: &mut String) {
    if options.is_empty() {
        return;
    }
    out.push('[');
    out.push_str(&options.join(","));
    out.push(']');
}

fn write_indented(nodes: &[LatexNode], depth: usize, out: &mut String) {
    for node in nodes {
        write_indented_node(node, depth, out);
    }
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn write_indented_node(node: &LatexNode, depth: usize, out: &mut String) {
    match node {
        LatexNode::Text(t) => out.push_str(&escape(&t.text)),
        LatexNode::Raw(r) => out.push_str(&r.value),
        LatexNode::Group(g) => {
            out.push('{');
            for child in &g.children {
                write_indented_node(child, depth, out);
            }
            out.push('}');
        }
        LatexNode::Command(cmd) => write_command_indented(cmd, depth, out),
        LatexNode::Environment(env) => write_environment_indented(env, depth, out),
    }
}

fn write_command_indented(cmd: &LatexCommand, depth: usize, out: &mut String) {
    out.push('\\');
    out.push_str(&cmd.name);
    write_options(&cmd.options, out);
    if cmd.args.is_empty() {
        if BLOCK_ENDING_COMMANDS.contains(&cmd.name.as_str()) {
            out.push('\n');
            indent(depth, out);
        } else {
            out.push(' ');
        }
        return;
    }
    for arg in &cmd.args {
        out.push('{');
        for child in &arg.children {
            write_indented_node(child, depth, out);
        }
        out.push('}');
    }
}

fn write_environment_indented(env: &LatexEnvironment, depth: usize, out: &mut String) {
    out.push_str("\\begin{");
    out.push_str(&env.name);
    out.push('}');
    write_options(&env.options, out);
    for arg in &env.args {
        out.push('{');
        for child in &arg.children {
            write_indented_node(child, depth, out);
        }
        out.push('}');
    }

    if LINE_PER_CHILD_ENVIRONMENTS.contains(&env.name.as_str()) {
        for child in &env.children {
            out.push('\n');
            indent(depth + 1, out);
            write_indented_node(child, depth + 1, out);
            if is_item_command(child) {
                out.push('\n');
            }
        }
        out.push('\n');
        indent(depth, out);
    } else {
        for child in &env.children {
            write_indented_node(child, depth, out);
        }
    }
    out.push_str("\\end{");
    out.push_str(&env.name);
    out.push('}');
}

fn is_item_command(node: &LatexNode) -> bool {
    matches!(node, LatexNode::Command(c) if c.name == "item")
}

/// LaTeX special-character escape table, applied only to `LatexText`.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            other => out.push(other),
        }
    }
    out
}
