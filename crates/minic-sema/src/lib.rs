//! MiniC semantic analysis
//!
//! Static name, kind and arity checking for MiniC programs, run over an AST
//! built by an external front-end.
//!
//! ## Architecture
//!
//! The crate is organized into:
//! - **AST** (`ast/`): Node arena with stable statement and expression ids
//! - **Semantic analysis** (`sema/`): Symbol table, diagnostics and the two-pass analyzer
//! - **Common** (`common/`): Spans, fatal errors and diagnostic rendering
//!
//! ## Example
//!
//! ```
//! use minic_sema::ast::{Ast, Param, PrimType};
//! use minic_sema::sema::{analyze, DiagnosticKind};
//!
//! // foo(1); int foo(int a, int b) { return a; }
//! let mut ast = Ast::new();
//! let one = ast.int(1);
//! let call = ast.call("foo", vec![one]);
//! let call = ast.expr_stmt(call);
//! let a = ast.var("a");
//! let ret = ast.ret(a);
//! let body = ast.block(vec![ret]);
//! let params = vec![Param::new(PrimType::Int, "a"), Param::new(PrimType::Int, "b")];
//! let foo = ast.fn_decl(PrimType::Int, "foo", params, body);
//! ast.push_top_level(call);
//! ast.push_top_level(foo);
//!
//! let analysis = analyze(&ast).unwrap();
//! assert_eq!(
//!     analysis.diagnostics.kinds(),
//!     vec![DiagnosticKind::ArgumentCountMismatch {
//!         function: "foo".into(),
//!         expected: 2,
//!         actual: 1,
//!     }]
//! );
//! ```

pub mod ast;
pub mod common;
pub mod sema;

// Re-exports for convenience
pub use common::{AnalysisError, AnalysisResult, DiagnosticReporter, Span};
pub use sema::{analyze, Analysis, AnalyzerConfig, Diagnostic, DiagnosticKind, Diagnostics, SemanticAnalyzer, SymbolTable};
