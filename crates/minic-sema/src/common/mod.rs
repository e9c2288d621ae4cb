//! Common infrastructure shared by the AST and the analyzer

mod error;
mod span;

pub use error::{AnalysisError, AnalysisResult, DiagnosticReporter};
pub use span::Span;
