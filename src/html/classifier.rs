//! Tag Classifier
//!
//! Frozen tables shared by the normalizer and the transformer. Kept as plain
//! data — slices of string literals and tuples — rather than functions with
//! embedded logic, so tests can enumerate the tables directly instead of
//! probing behaviour indirectly.

/// Tags whose whitespace is stripped at their boundaries and whose siblings
/// never have a collapsed space inserted between them.
pub const BLOCK_TAGS: &[&str] = &[
    "article", "aside", "blockquote", "body", "caption", "dd", "div", "dl", "dt", "figure",
    "figcaption", "footer", "header", "html", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

/// Block-level tags that render as their children with no wrapper.
pub const BLOCK_PASSTHROUGH: &[&str] = &["article", "aside", "footer", "header", "main", "nav", "section"];

/// Inline tags that render as their children with no wrapper.
pub const INLINE_PASSTHROUGH: &[&str] = &["abbr", "dfn", "span", "time"];

/// `tag -> \command` for simple one-argument inline formatting commands.
pub const INLINE_COMMANDS: &[(&str, &str)] = &[
    ("strong", "textbf"),
    ("b", "textbf"),
    ("em", "textit"),
    ("i", "textit"),
    ("u", "underline"),
    ("ins", "underline"),
    ("code", "texttt"),
    ("kbd", "texttt"),
    ("samp", "texttt"),
    ("var", "textit"),
    ("cite", "textit"),
    ("sup", "textsuperscript"),
    ("sub", "textsubscript"),
    ("del", "sout"),
    ("s", "sout"),
    ("strike", "sout"),
];

/// `tag -> \sectioning command`.
pub const HEADING_COMMANDS: &[(&str, &str)] = &[
    ("h1", "section"),
    ("h2", "subsection"),
    ("h3", "subsubsection"),
    ("h4", "paragraph"),
    ("h5", "subparagraph"),
];

/// Classes that mark an element as a math container (tag `math`, or the
/// `data-latex`/`data-math` attributes, are checked separately by callers).
pub const MATH_CLASSES: &[&str] = &["math-tex", "math-tex-block", "math-display", "math-inline"];

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub fn is_block_passthrough(tag: &str) -> bool {
    BLOCK_PASSTHROUGH.contains(&tag)
}

pub fn is_inline_passthrough(tag: &str) -> bool {
    INLINE_PASSTHROUGH.contains(&tag)
}

pub fn inline_command_for(tag: &str) -> Option<&'static str> {
    INLINE_COMMANDS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, cmd)| *cmd)
}

pub fn heading_command_for(tag: &str) -> Option<&'static str> {
    HEADING_COMMANDS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, cmd)| *cmd)
}
