//! Package Inferer
//!
//! A post-transform walk of the LaTeX AST that reports which LaTeX packages
//! the emitted commands/environments depend on. Kept as a pure function over
//! the already-built AST rather than something the transformer tracks as it
//! goes, so adding a new command-to-package rule never touches the
//! transformer.

use std::collections::BTreeSet;

use crate::latex::ast::LatexNode;

const fn rules() -> &'static [(&'static str, &'static str)] {
    &[
        ("href", "hyperref"),
        ("url", "hyperref"),
        ("includegraphics", "graphicx"),
        ("sout", "ulem"),
        ("colorbox", "xcolor"),
        ("textcolor", "xcolor"),
    ]
}

/// Walk `nodes` and return the sorted, deduplicated set of packages they
/// require.
pub fn infer_packages(nodes: &[LatexNode]) -> Vec<String> {
    let mut packages = BTreeSet::new();
    for node in nodes {
        collect(node, &mut packages);
    }
    packages.into_iter().collect()
}

fn collect(node: &LatexNode, packages: &mut BTreeSet<String>) {
    match node {
        LatexNode::Text(_) | LatexNode::Raw(_) => {}
        LatexNode::Group(g) => {
            for child in &g.children {
                collect(child, packages);
            }
        }
        LatexNode::Command(cmd) => {
            if let Some((_, pkg)) = rules().iter().find(|(name, _)| *name == cmd.name) {
                packages.insert((*pkg).to_string());
            }
            for arg in &cmd.args {
                for child in &arg.children {
                    collect(child, packages);
                }
            }
        }
        LatexNode::Environment(env) => {
            if env.name == "tabularx" {
                packages.insert("tabularx".to_string());
            }
            for arg in &env.args {
                for child in &arg.children {
                    collect(child, packages);
                }
            }
            for child in &env.children {
                collect(child, packages);
            }
        }
    }
}

/// The preamble half of a [`crate::latex::LatexDocumentAst`]: one
/// `\usepackage{name}` command node per inferred package, in the same sorted
/// order `infer_packages` returns them in.
pub fn preamble_nodes(packages: &[String]) -> Vec<LatexNode> {
    packages
        .iter()
        .map(|pkg| LatexNode::command1("usepackage", vec![LatexNode::raw(pkg.clone())]))
        .collect()
}

/// Build the preamble string: one `\usepackage{name}` line per inferred
/// package, plus `metadata["preamble"]` appended verbatim when present.
pub fn build_preamble(packages: &[String], extra_preamble: Option<&str>) -> String {
    let mut out = String::new();
    for pkg in packages {
        out.push_str(&format!("\\usepackage{{{pkg}}}\n"));
    }
    if let Some(extra) = extra_preamble {
        out.push_str(extra);
    }
    out
}
