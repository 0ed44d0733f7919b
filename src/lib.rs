//! Converts HTML fragments into LaTeX source through a typed AST pipeline:
//! parse (via `html5ever`) -> normalize whitespace -> transform to a LaTeX
//! AST -> serialize -> infer required packages. See [`facade::convert`] for
//! the entry point, and [`diagnostics`] for the structured event channel
//! that reports what the conversion had to paper over.
//!
//! ```
//! use html2latex::{convert, ConvertOptions};
//!
//! let opts = ConvertOptions::new().formatted(false);
//! let doc = convert("<p>Hello <strong>World</strong></p>", &opts).unwrap();
//! assert_eq!(doc.body, "Hello \\textbf{World}\\par ");
//! ```

pub mod diagnostics;
pub mod facade;
pub mod html;
pub mod latex;
pub mod options;
mod transform;

pub use diagnostics::{DiagnosticEvent, DiagnosticsError, Location, Severity};
pub use facade::{convert, html2latex, render, Converter, LatexDocument};
pub use options::ConvertOptions;
