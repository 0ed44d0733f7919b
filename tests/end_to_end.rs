//! End-to-end scenarios, mirroring the concrete input/output pairs this
//! crate's behaviour is pinned against. Table-driven via `rstest` where a
//! single shape repeats across cases.

use html2latex::{convert, ConvertOptions};
use rstest::rstest;

fn compact() -> ConvertOptions {
    ConvertOptions::new().formatted(false).strict(false)
}

#[rstest]
#[case("<p>Hello <strong>World</strong></p>", "Hello \\textbf{World}\\par ")]
#[case("<ul><li>A</li><li>B</li></ul>", "\\begin{itemize}\\item A\\item B\\end{itemize}")]
#[case(
    "<a href=\"https://ex.com\">Link</a>",
    "\\href{https://ex.com}{Link}"
)]
#[case(
    "<table><tr><th>H</th></tr><tr><td>x</td></tr></table>",
    "\\begin{tabular}{l}\\textbf{H} \\\\x \\\\\\end{tabular}"
)]
fn matches_documented_body(#[case] input: &str, #[case] expected: &str) {
    let doc = convert(input, &compact()).unwrap();
    assert_eq!(doc.body, expected);
}

#[test]
fn math_span_scenario() {
    let doc = convert(r#"<span class="math-tex">\(x+1\)</span>"#, &compact()).unwrap();
    assert_eq!(doc.body, "\\(x+1\\)");
    assert!(doc.packages.is_empty());
}

#[test]
fn missing_attribute_value_non_strict_reports_one_error_event() {
    let doc = convert("<div id=>Hi</div>", &compact()).unwrap();
    assert!(doc.body.contains("Hi\\par "));
    assert_eq!(doc.diagnostics.len(), 1);
    assert_eq!(doc.diagnostics[0].code, "missing-attribute-value");
}

#[test]
fn missing_attribute_value_strict_raises() {
    let opts = compact().strict(true);
    let err = convert("<div id=>Hi</div>", &opts).unwrap_err();
    assert_eq!(err.events.len(), 1);
}

#[test]
fn unknown_tag_renders_children_with_no_diagnostic() {
    let doc = convert("<marquee>scrolling</marquee>", &compact()).unwrap();
    assert_eq!(doc.body, "scrolling");
    assert!(doc.diagnostics.is_empty());
}

#[test]
fn img_with_no_src_and_no_alt_warns_and_emits_nothing() {
    let doc = convert("<img>", &compact()).unwrap();
    assert_eq!(doc.body, "");
    assert_eq!(doc.diagnostics.len(), 1);
    assert_eq!(doc.diagnostics[0].code, "missing-image-source");
}

#[test]
fn reversed_ol_counts_down_through_the_correct_values() {
    // For n items the pre-loop counter must be n+1 so that each item's
    // `\addtocounter{-2}` followed by `\item`'s implicit `\refstepcounter`
    // (net -1/item) displays n, n-1, ..., 1 rather than n-1, n-2, ..., 0.
    let html = "<ol reversed><li>A</li><li>B</li><li>C</li></ol>";
    let doc = convert(html, &compact()).unwrap();
    assert_eq!(
        doc.body,
        "\\begin{enumerate}\\setcounter{enumi}{4}\\addtocounter{enumi}{-2}\\item A\\addtocounter{enumi}{-2}\\item B\\addtocounter{enumi}{-2}\\item C\\end{enumerate}"
    );
}

#[test]
fn ol_start_zero_is_clamped_without_setcounter() {
    let doc = convert("<ol start=\"0\"><li>A</li></ol>", &compact()).unwrap();
    assert!(!doc.body.contains("setcounter"));
}

#[test]
fn ol_start_non_numeric_is_treated_as_one() {
    let doc = convert("<ol start=\"abc\"><li>A</li></ol>", &compact()).unwrap();
    assert!(!doc.body.contains("setcounter"));
}

#[test]
fn nested_list_structure_round_trips_through_the_whole_pipeline() {
    let html = "<ul><li>top<ul><li>nested</li></ul></li></ul>";
    let doc = convert(html, &compact()).unwrap();
    assert_eq!(doc.body.matches("itemize").count(), 4); // 2 begins + 2 ends
}

#[test]
fn figure_with_caption_end_to_end() {
    let html = "<figure><img src=\"a.png\"><figcaption>A cap</figcaption></figure>";
    let doc = convert(html, &compact()).unwrap();
    assert!(doc.body.contains("\\begin{figure}"));
    assert!(doc.body.contains("\\caption{A cap}"));
    assert!(doc.packages.contains(&"graphicx".to_string()));
}

#[test]
fn render_wraps_in_document_template() {
    let opts = compact();
    let rendered = html2latex::render("<p>Hi</p>", &opts, None).unwrap();
    assert!(rendered.starts_with("\\documentclass{article}"));
    assert!(rendered.ends_with("\\end{document}"));
}

#[test]
fn blockquote_renders_as_quote_environment() {
    let doc = convert("<blockquote><p>Quoted</p></blockquote>", &compact()).unwrap();
    assert!(doc.body.starts_with("\\begin{quote}"));
}

#[test]
fn whitespace_only_input_is_empty() {
    let doc = convert("   \n\t  ", &compact()).unwrap();
    assert_eq!(doc.body, "");
    assert!(doc.packages.is_empty());
    assert!(doc.diagnostics.is_empty());
}
