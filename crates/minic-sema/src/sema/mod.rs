//! Semantic analysis module
//!
//! Name, kind and arity checking over a finished [`Ast`](crate::ast::Ast).

mod analyzer;
mod config;
mod diagnostics;
mod scope;

pub use analyzer::{analyze, Analysis, SemanticAnalyzer};
pub use config::AnalyzerConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, MismatchContext};
pub use scope::{ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable};
