//! Converter Facade
//!
//! Orchestrates parse -> normalize -> transform -> serialize -> package
//! inference, and is the only place that knows about `ConvertOptions` or
//! calls `enforce_strict`. Every other stage is a pure function of its own
//! inputs; this module is where they get wired together and where logging
//! call sites live.

use crate::diagnostics::{self, DiagnosticEvent, DiagnosticsError, Severity};
use crate::html;
use crate::latex;
use crate::options::ConvertOptions;
use crate::transform;

/// Result of a conversion: rendered body, inferred preamble, the packages
/// that preamble requires, and every diagnostic collected along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexDocument {
    pub body: String,
    pub preamble: String,
    pub packages: Vec<String>,
    pub diagnostics: Vec<DiagnosticEvent>,
}

const DEFAULT_TEMPLATE: &str = "\\documentclass{article}\n{preamble}\n\\begin{document}\n{body}\n\\end{document}";

/// Run the full pipeline over `html` under `options`.
pub fn convert(html_input: &str, options: &ConvertOptions) -> Result<LatexDocument, DiagnosticsError> {
    let _scope = diagnostics::diagnostic_context(true);

    log::debug!("convert: starting (fragment={})", options.fragment);
    let (document, parse_diagnostics) = html::parse(html_input, options.fragment);
    for event in parse_diagnostics {
        diagnostics::emit(event);
    }
    log::debug!("convert: parsed {} top-level node(s)", document.children.len());

    let normalized = html::normalize(&document);
    log::debug!(
        "convert: normalized {} top-level node(s)",
        normalized.children.len()
    );

    let body_nodes = transform::transform(&normalized.children);
    log::debug!("convert: transformed to {} latex node(s)", body_nodes.len());

    let packages = latex::infer_packages(&body_nodes);
    let document_ast = latex::LatexDocumentAst {
        preamble: latex::preamble_nodes(&packages),
        body: body_nodes,
        metadata: options.metadata.clone(),
    };
    log::debug!(
        "convert: assembled document ast ({} preamble node(s), {} body node(s))",
        document_ast.preamble.len(),
        document_ast.body.len()
    );

    let body = latex::serialize(&document_ast.body, options.formatted);
    log::debug!("convert: serialized body ({} byte(s))", body.len());

    let extra_preamble = document_ast.metadata.get("preamble").map(String::as_str);
    let preamble = latex::build_preamble(&packages, extra_preamble);

    let events = diagnostics::peek();
    if options.strict {
        diagnostics::enforce_strict(&events)?;
    }

    Ok(LatexDocument {
        body,
        preamble,
        packages,
        diagnostics: events,
    })
}

/// Shorthand for `convert(...).body`.
pub fn html2latex(html_input: &str, options: &ConvertOptions) -> Result<String, DiagnosticsError> {
    convert(html_input, options).map(|doc| doc.body)
}

/// Wrap the converted body in a document template. `template` overrides
/// `options.template`, which overrides the built-in default. Recognised
/// placeholders: `{preamble}`, `{body}`.
pub fn render(
    html_input: &str,
    options: &ConvertOptions,
    template: Option<&str>,
) -> Result<String, DiagnosticsError> {
    let document = convert(html_input, options)?;
    let template = template
        .or(options.template.as_deref())
        .unwrap_or(DEFAULT_TEMPLATE);
    Ok(template
        .replace("{preamble}", &document.preamble)
        .replace("{body}", &document.body))
}

/// A reusable binding of [`ConvertOptions`] with convenience methods and a
/// held copy of the diagnostics from its last conversion.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
    last_diagnostics: Vec<DiagnosticEvent>,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            last_diagnostics: Vec::new(),
        }
    }

    /// Return a new `Converter` whose options are `self.options` with `changes`
    /// applied on top — every field `changes` doesn't touch (including
    /// `metadata`) carries over from the current options, rather than being
    /// reset to `ConvertOptions::default()`.
    pub fn with_options(&self, changes: impl FnOnce(ConvertOptions) -> ConvertOptions) -> Self {
        Self {
            options: changes(self.options.clone()),
            last_diagnostics: Vec::new(),
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn last_diagnostics(&self) -> &[DiagnosticEvent] {
        &self.last_diagnostics
    }

    pub fn convert(&mut self, html_input: &str) -> Result<LatexDocument, DiagnosticsError> {
        let result = convert(html_input, &self.options);
        match &result {
            Ok(doc) => self.last_diagnostics = doc.diagnostics.clone(),
            Err(err) => self.last_diagnostics = err.events.clone(),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_paragraph_matches_documented_scenario() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("<p>Hello <strong>World</strong></p>", &opts).unwrap();
        assert_eq!(doc.body, "Hello \\textbf{World}\\par ");
        assert!(doc.packages.is_empty());
    }

    #[test]
    fn itemize_scenario() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("<ul><li>A</li><li>B</li></ul>", &opts).unwrap();
        assert_eq!(doc.body, "\\begin{itemize}\\item A\\item B\\end{itemize}");
    }

    #[test]
    fn anchor_scenario_requires_hyperref() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("<a href=\"https://ex.com\">Link</a>", &opts).unwrap();
        assert_eq!(doc.body, "\\href{https://ex.com}{Link}");
        assert_eq!(doc.packages, vec!["hyperref".to_string()]);
    }

    #[test]
    fn table_scenario() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("<table><tr><th>H</th></tr><tr><td>x</td></tr></table>", &opts).unwrap();
        assert_eq!(
            doc.body,
            "\\begin{tabular}{l}\\textbf{H} \\\\x \\\\\\end{tabular}"
        );
    }

    #[test]
    fn math_span_scenario() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert(r#"<span class="math-tex">\(x+1\)</span>"#, &opts).unwrap();
        assert_eq!(doc.body, "\\(x+1\\)");
    }

    #[test]
    fn missing_attribute_value_reported_non_strict() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("<div id=>Hi</div>", &opts).unwrap();
        assert!(doc.body.contains("Hi\\par "));
        assert!(doc
            .diagnostics
            .iter()
            .any(|d| d.code == "missing-attribute-value" && d.severity == Severity::Error));
    }

    #[test]
    fn missing_attribute_value_raises_in_strict_mode() {
        let opts = ConvertOptions::new().formatted(false).strict(true);
        let err = convert("<div id=>Hi</div>", &opts).unwrap_err();
        assert!(err.events.iter().any(|e| e.code == "missing-attribute-value"));
    }

    #[test]
    fn empty_input_produces_empty_document() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let doc = convert("   ", &opts).unwrap();
        assert_eq!(doc.body, "");
        assert!(doc.packages.is_empty());
        assert!(doc.diagnostics.is_empty());
    }

    #[test]
    fn purity_same_input_same_output() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let first = convert("<p>Hi <em>there</em></p>", &opts).unwrap();
        let second = convert("<p>Hi <em>there</em></p>", &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_wraps_body_in_default_template() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let rendered = render("<p>Hi</p>", &opts, None).unwrap();
        assert!(rendered.starts_with("\\documentclass{article}"));
        assert!(rendered.contains("Hi\\par "));
    }

    #[test]
    fn html2latex_is_body_shorthand() {
        let opts = ConvertOptions::new().formatted(false).strict(false);
        let body = html2latex("<p>Hi</p>", &opts).unwrap();
        assert_eq!(body, "Hi\\par ");
    }

    #[test]
    fn with_options_preserves_untouched_fields() {
        let base = ConvertOptions::new()
            .formatted(false)
            .strict(false)
            .with_metadata("preamble", "\\usepackage{amsmath}\n");
        let converter = Converter::new(base);
        let adjusted = converter.with_options(|o| o.strict(true));
        assert!(adjusted.options().strict);
        assert!(!adjusted.options().formatted);
        assert_eq!(
            adjusted.options().metadata.get("preamble").map(String::as_str),
            Some("\\usepackage{amsmath}\n")
        );
    }

    #[test]
    fn converter_remembers_last_diagnostics() {
        let mut converter = Converter::new(ConvertOptions::new().strict(false));
        converter.convert("<div id=>Hi</div>").unwrap();
        assert!(!converter.last_diagnostics().is_empty());
    }
}
