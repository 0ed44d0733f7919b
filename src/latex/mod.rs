//! LaTeX-side half of the pipeline: the closed AST, the serializer, and the
//! package inference pass.

pub mod ast;
pub mod package_inferer;
pub mod serializer;

pub use ast::{LatexCommand, LatexDocumentAst, LatexEnvironment, LatexGroup, LatexNode, LatexRaw, LatexText};
pub use package_inferer::{build_preamble, infer_packages, preamble_nodes};
pub use serializer::serialize;
