//! LaTeX AST
//!
//! Mirrors [`crate::html::HtmlNode`] in spirit: a small closed set of node
//! shapes, dispatched by exhaustive match, never by trait object. `LatexRaw`
//! is the escape hatch for content the transformer has already rendered to
//! final LaTeX text (math payloads, table rows) and that the serializer must
//! never touch again.

/// One node of the LaTeX tree produced by the transformer and consumed by
/// the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatexNode {
    /// User-facing text; the serializer escapes this before emitting it.
    Text(LatexText),
    /// Pre-formed LaTeX, emitted verbatim. Never escaped.
    Raw(LatexRaw),
    /// A bare `{…}` group.
    Group(LatexGroup),
    /// `\name[opt1,opt2]{arg1}{arg2}`.
    Command(LatexCommand),
    /// `\begin{name}[opts]{args}…\end{name}`.
    Environment(LatexEnvironment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexRaw {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexGroup {
    pub children: Vec<LatexNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexCommand {
    pub name: String,
    pub args: Vec<LatexGroup>,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexEnvironment {
    pub name: String,
    pub children: Vec<LatexNode>,
    pub args: Vec<LatexGroup>,
    pub options: Vec<String>,
}

impl LatexNode {
    pub fn text(text: impl Into<String>) -> Self {
        LatexNode::Text(LatexText { text: text.into() })
    }

    pub fn raw(value: impl Into<String>) -> Self {
        LatexNode::Raw(LatexRaw { value: value.into() })
    }

    pub fn group(children: Vec<LatexNode>) -> Self {
        LatexNode::Group(LatexGroup { children })
    }

    /// A command taking exactly one argument group, the common case for
    /// the per-tag rules in the transformer.
    pub fn command1(name: impl Into<String>, arg: Vec<LatexNode>) -> Self {
        LatexNode::Command(LatexCommand {
            name: name.into(),
            args: vec![LatexGroup { children: arg }],
            options: Vec::new(),
        })
    }

    /// A command taking no arguments (e.g. `\par`, `\newline`, `\hrule`).
    pub fn command0(name: impl Into<String>) -> Self {
        LatexNode::Command(LatexCommand {
            name: name.into(),
            args: Vec::new(),
            options: Vec::new(),
        })
    }

    /// A command taking an arbitrary number of argument groups, each given
    /// as raw text (e.g. `\setcounter{enumi}{3}`).
    pub fn command_args(name: impl Into<String>, args: Vec<&str>) -> Self {
        LatexNode::Command(LatexCommand {
            name: name.into(),
            args: args
                .into_iter()
                .map(|a| LatexGroup {
                    children: vec![LatexNode::raw(a.to_string())],
                })
                .collect(),
            options: Vec::new(),
        })
    }

    pub fn environment(name: impl Into<String>, children: Vec<LatexNode>) -> Self {
        LatexNode::Environment(LatexEnvironment {
            name: name.into(),
            children,
            args: Vec::new(),
            options: Vec::new(),
        })
    }
}

impl LatexCommand {
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}

impl LatexEnvironment {
    pub fn with_args(mut self, args: Vec<LatexGroup>) -> Self {
        self.args = args;
        self
    }
}

/// Top-level tree the transformer/package-inferer stages hand to the
/// serializer: a preamble sequence, a body sequence, and free-form metadata
/// threaded through from [`crate::options::ConvertOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LatexDocumentAst {
    pub preamble: Vec<LatexNode>,
    pub body: Vec<LatexNode>,
    pub metadata: std::collections::BTreeMap<String, String>,
}

impl LatexDocumentAst {
    pub fn new(body: Vec<LatexNode>) -> Self {
        Self {
            preamble: Vec::new(),
            body,
            metadata: std::collections::BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command1_wraps_children_in_one_group() {
        let node = LatexNode::command1("textbf", vec![LatexNode::text("World")]);
        match node {
            LatexNode::Command(cmd) => {
                assert_eq!(cmd.name, "textbf");
                assert_eq!(cmd.args.len(), 1);
                assert_eq!(cmd.args[0].children.len(), 1);
            }
            _ => panic!("expected a command"),
        }
    }

    #[test]
    fn command0_has_no_args() {
        let node = LatexNode::command0("par");
        match node {
            LatexNode::Command(cmd) => assert!(cmd.args.is_empty()),
            _ => panic!("expected a command"),
        }
    }
}
