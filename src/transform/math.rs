//! Math container handling (SPEC_FULL §4.5.4).

use crate::html::ast::HtmlElement;
use crate::html::classifier::MATH_CLASSES;
use crate::latex::ast::LatexNode;

/// Whether `el` should be treated as a math container: tag `math`, a
/// `data-latex`/`data-math` attribute, or a class in [`MATH_CLASSES`].
pub fn is_math_container(el: &HtmlElement) -> bool {
    el.tag == "math"
        || el.has_attr("data-latex")
        || el.has_attr("data-math")
        || MATH_CLASSES.iter().any(|c| el.has_class(c))
}

pub fn transform_math(el: &HtmlElement) -> Vec<LatexNode> {
    let payload = el
        .attr("data-latex")
        .or_else(|| el.attr("data-math"))
        .map(str::to_string)
        .unwrap_or_else(|| el.text_content());
    let payload = payload.trim();
    if payload.is_empty() {
        return Vec::new();
    }

    let (cleaned, display) = strip_delimiters(payload, infer_display_default(el));
    if cleaned.is_empty() {
        return Vec::new();
    }

    let wrapped = if display {
        format!("\\[{cleaned}\\]")
    } else {
        format!("\\({cleaned}\\)")
    };
    vec![LatexNode::raw(wrapped)]
}

fn infer_display_default(el: &HtmlElement) -> bool {
    el.tag == "div" || el.tag == "p" || el.has_class("math-tex-block") || el.has_class("math-display")
}

/// Strip a recognised math delimiter pair, returning the inner payload and
/// whether the wrapper indicated display mode. When no wrapper matches,
/// `default_display` (inferred from tag/class) is used unchanged.
fn strip_delimiters(payload: &str, default_display: bool) -> (String, bool) {
    let pairs: &[(&str, &str, bool)] = &[
        ("\\[", "\\]", true),
        ("\\(", "\\)", false),
        ("$$", "$$", true),
        ("$", "$", false),
    ];
    for (open, close, display) in pairs {
        if let Some(inner) = payload
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return (inner.trim().to_string(), *display);
        }
    }
    (payload.to_string(), default_display)
}
